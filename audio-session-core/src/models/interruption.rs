/// Interruption notification delivered by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterruptionEvent {
    /// Another party took the session away.
    Began,
    /// The interruption is over. `should_resume` mirrors the OS resume hint.
    Ended { should_resume: bool },
}

impl InterruptionEvent {
    pub fn suggests_resume(&self) -> bool {
        matches!(self, Self::Ended { should_resume: true })
    }
}
