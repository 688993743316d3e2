pub mod usage;

/// Sections of the page which take over the keyboard once activated
pub trait SectionActivation {
    fn activate(&mut self);
    fn deactivate(&mut self);
}
