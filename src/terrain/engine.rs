use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread::{self, JoinHandle};

use crate::terrain::config::{GridConfig, GridConfigError};
use crate::terrain::mesh::TerrainMesh;

pub enum TerrainCommand {
    Rebuild { config: GridConfig, seed: u64 },
    Stop,
}

pub enum TerrainResult {
    Built(TerrainMesh),
    Error(String),
}

pub struct TerrainEngine {
    tx_cmd: Sender<TerrainCommand>,
    rx_result: Option<Receiver<TerrainResult>>,
    last_error: Arc<Mutex<Option<String>>>,
    next_generation: Arc<AtomicU64>,
    thread_handle: Option<JoinHandle<()>>,
}

impl TerrainEngine {
    pub fn new(first_generation: u64) -> Self {
        let (tx_cmd, rx_cmd) = channel::unbounded::<TerrainCommand>();
        let (tx_result, rx_result) = channel::bounded::<TerrainResult>(2);
        let last_error = Arc::new(Mutex::new(None));
        let last_error_clone = Arc::clone(&last_error);
        let next_generation = Arc::new(AtomicU64::new(first_generation));
        let next_generation_clone = Arc::clone(&next_generation);

        let thread_handle = thread::Builder::new()
            .name("terrain-builder".into())
            .spawn(move || {
                terrain_thread(rx_cmd, tx_result, last_error_clone, next_generation_clone);
            })
            .map_err(|e| log::error!("failed to spawn terrain builder: {}", e))
            .ok();

        Self {
            tx_cmd,
            rx_result: Some(rx_result),
            last_error,
            next_generation,
            thread_handle,
        }
    }

    pub fn request_rebuild(&self, config: GridConfig, seed: u64) -> Result<(), GridConfigError> {
        if let Err(e) = config.validate() {
            log::warn!("rejected grid configuration {:?}: {}", config, e);
            *self.last_error.lock() = Some(e.to_string());
            return Err(e);
        }

        *self.last_error.lock() = None;
        let _ = self.tx_cmd.send(TerrainCommand::Rebuild { config, seed });
        Ok(())
    }

    /// Drains pending results and returns the newest mesh.
    pub fn try_recv_mesh(&self) -> Option<TerrainMesh> {
        let rx_result = self.rx_result.as_ref()?;
        let mut latest = None;
        while let Ok(result) = rx_result.try_recv() {
            match result {
                TerrainResult::Built(mesh) => latest = Some(mesh),
                TerrainResult::Error(e) => log::warn!("terrain rebuild failed: {}", e),
            }
        }
        latest
    }

    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().clone()
    }

    pub fn stop(&self) {
        let _ = self.tx_cmd.send(TerrainCommand::Stop);
    }
}

impl Drop for TerrainEngine {
    fn drop(&mut self) {
        let _ = self.tx_cmd.send(TerrainCommand::Stop);
        // Unblocks a builder stuck sending into a full result channel.
        drop(self.rx_result.take());
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

fn terrain_thread(
    rx_cmd: Receiver<TerrainCommand>,
    tx_result: Sender<TerrainResult>,
    last_error: Arc<Mutex<Option<String>>>,
    next_generation: Arc<AtomicU64>,
) {
    loop {
        let cmd = match rx_cmd.recv() {
            Ok(c) => c,
            Err(_) => return,
        };

        match cmd {
            TerrainCommand::Rebuild { config, seed } => {
                let generation = next_generation.fetch_add(1, Ordering::Relaxed);
                match TerrainMesh::build_seeded(&config, seed, generation) {
                    Ok(mesh) => {
                        log::debug!(
                            "built generation {} ({}x{} segments)",
                            generation,
                            config.width_segments,
                            config.height_segments
                        );
                        if tx_result.send(TerrainResult::Built(mesh)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        let message = e.to_string();
                        *last_error.lock() = Some(message.clone());
                        let _ = tx_result.send(TerrainResult::Error(message));
                    }
                }
            }
            TerrainCommand::Stop => return,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    fn wait_for_mesh(engine: &TerrainEngine) -> Option<TerrainMesh> {
        let deadline = Instant::now() + Duration::from_secs(5);
        while Instant::now() < deadline {
            if let Some(mesh) = engine.try_recv_mesh() {
                return Some(mesh);
            }
            thread::sleep(Duration::from_millis(5));
        }
        None
    }

    #[test]
    fn builds_requested_mesh() {
        let engine = TerrainEngine::new(1);
        engine
            .request_rebuild(GridConfig::new(4.0, 4.0, 3, 2), 5)
            .unwrap();

        let mesh = wait_for_mesh(&engine).expect("mesh within timeout");
        assert_eq!(mesh.vertex_count(), 12);
        assert_eq!(mesh.generation(), 1);
        assert!(engine.last_error().is_none());
    }

    #[test]
    fn rejects_invalid_config_without_building() {
        let engine = TerrainEngine::new(1);
        let err = engine
            .request_rebuild(GridConfig::new(4.0, 0.0, 3, 2), 5)
            .unwrap_err();

        assert_eq!(err, GridConfigError::NonPositiveHeight(0.0));
        assert!(engine.last_error().is_some());
        thread::sleep(Duration::from_millis(20));
        assert!(engine.try_recv_mesh().is_none());

        engine
            .request_rebuild(GridConfig::new(4.0, 4.0, 1, 1), 5)
            .unwrap();
        assert_eq!(wait_for_mesh(&engine).map(|m| m.generation()), Some(1));
    }

    #[test]
    fn drop_with_undrained_meshes_joins_builder() {
        let engine = TerrainEngine::new(1);
        for seed in 0..5 {
            engine
                .request_rebuild(GridConfig::new(4.0, 4.0, 2, 2), seed)
                .unwrap();
        }
        thread::sleep(Duration::from_millis(200));

        let (done_tx, done_rx) = channel::bounded(1);
        thread::spawn(move || {
            drop(engine);
            let _ = done_tx.send(());
        });

        assert!(
            done_rx.recv_timeout(Duration::from_secs(3)).is_ok(),
            "builder thread did not stop"
        );
    }
}
