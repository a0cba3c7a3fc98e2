use crate::key::Key;

/// A game that a frontend can drive one frame at a time.
///
/// `update` receives a monotonic timestamp in milliseconds and an RGB24
/// screen buffer of `width() * height() * 3` bytes to draw into.
pub trait App {
    fn init(&mut self);
    fn update(&mut self, timestamp_ms: f64, screen: &mut [u8]);
    fn handle_key_event(&mut self, key: Key, is_down: bool);
    fn should_exit(&self) -> bool;
    fn exit(&mut self);

    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn scale(&self) -> u32;
    fn title(&self) -> String;
}
