use crate::integrator::BlockIntegrator;
use crate::policy::{Degeneracy, Schedule};

#[derive(Debug, Clone, Default)]
pub struct BlockIntegratorBuilder {
    degeneracy: Option<Degeneracy>,
    schedule: Option<Schedule>,
    check_coordinates: bool,
}

impl BlockIntegratorBuilder {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_degeneracy(mut self, degeneracy: Degeneracy) -> Self {
        self.degeneracy = Some(degeneracy);
        self
    }
    pub fn with_schedule(mut self, schedule: Schedule) -> Self {
        self.schedule = Some(schedule);
        self
    }
    /// Verify that coordinates strictly increase inside every block.
    pub fn check_coordinates(mut self, enabled: bool) -> Self {
        self.check_coordinates = enabled;
        self
    }
    pub fn build(self) -> BlockIntegrator {
        BlockIntegrator::from_parts(
            self.degeneracy.unwrap_or_default(),
            self.schedule,
            self.check_coordinates,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_options_fall_back_to_defaults() {
        let integrator = BlockIntegratorBuilder::new().build();
        assert_eq!(integrator.degeneracy(), Degeneracy::ZeroFill);
        assert_eq!(integrator.schedule(), None);
        assert!(!integrator.checks_coordinates());
    }

    #[test]
    fn options_are_carried_through() {
        let integrator = BlockIntegratorBuilder::new()
            .with_degeneracy(Degeneracy::Propagate)
            .with_schedule(Schedule::Serial)
            .check_coordinates(true)
            .build();
        assert_eq!(integrator.degeneracy(), Degeneracy::Propagate);
        assert_eq!(integrator.schedule(), Some(Schedule::Serial));
        assert!(integrator.checks_coordinates());
    }
}
