use glam::Vec2;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    ndc: Option<Vec2>,
}

impl PointerState {
    pub fn unset() -> Self {
        Self { ndc: None }
    }

    pub fn from_ndc(ndc: Vec2) -> Self {
        Self { ndc: Some(ndc) }
    }

    pub fn ndc(&self) -> Option<Vec2> {
        self.ndc
    }

    pub fn update_from_screen(&mut self, x: f32, y: f32, width: f32, height: f32) {
        if width <= 0.0 || height <= 0.0 {
            return;
        }

        self.ndc = Some(Vec2::new(
            (x / width) * 2.0 - 1.0,
            -(y / height) * 2.0 + 1.0,
        ));
    }

    pub fn clear(&mut self) {
        self.ndc = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unset() {
        assert_eq!(PointerState::default().ndc(), None);
    }

    #[test]
    fn normalizes_corners_and_center() {
        let mut pointer = PointerState::unset();

        pointer.update_from_screen(0.0, 0.0, 800.0, 600.0);
        assert_eq!(pointer.ndc(), Some(Vec2::new(-1.0, 1.0)));

        pointer.update_from_screen(800.0, 600.0, 800.0, 600.0);
        assert_eq!(pointer.ndc(), Some(Vec2::new(1.0, -1.0)));

        pointer.update_from_screen(400.0, 300.0, 800.0, 600.0);
        assert_eq!(pointer.ndc(), Some(Vec2::ZERO));
    }

    #[test]
    fn latest_event_wins() {
        let mut pointer = PointerState::unset();
        pointer.update_from_screen(0.0, 0.0, 100.0, 100.0);
        pointer.update_from_screen(50.0, 50.0, 100.0, 100.0);
        assert_eq!(pointer.ndc(), Some(Vec2::ZERO));
    }

    #[test]
    fn zero_viewport_keeps_previous_value() {
        let mut pointer = PointerState::from_ndc(Vec2::new(0.25, 0.5));
        pointer.update_from_screen(10.0, 10.0, 0.0, 600.0);
        assert_eq!(pointer.ndc(), Some(Vec2::new(0.25, 0.5)));
    }
}
