/// Fire-and-forget vibration capability.
///
/// Implementations must not block or report back. Hosts without vibration
/// simply do not install one.
pub trait Haptics {
    /// Start a pattern of alternating on/off durations in ms.
    fn vibrate(&mut self, pattern: &[u32]);

    /// Cancel any running pattern.
    fn stop(&mut self);
}
