//! Planning session state.
//!
//! The session owns the one mutable thing in the system, the current
//! fenestration set, together with everything fixed for the session:
//! template, conventions, limits and layout. Every accepted mutation swaps in
//! a new set and recomputes the pattern; a rejected one leaves both intact.

use crate::angle::AngleInput;
use crate::catalog::GraftTemplate;
use crate::fenestration::{Fenestration, FenestrationSet, ValidationLimits};
use crate::layout::LayoutConfig;
use crate::pattern::{compute_pattern, Pattern, PatternOptions};
use graftmark_core::{Result, Vessel};
use tracing::{debug, info, info_span};
use uuid::Uuid;

/// One editing session for one graft template
#[derive(Debug, Clone)]
pub struct PlanningSession {
    id: Uuid,
    template: GraftTemplate,
    options: PatternOptions,
    limits: ValidationLimits,
    layout: LayoutConfig,
    set: FenestrationSet,
    pattern: Pattern,
}

impl PlanningSession {
    /// Starts a session with an empty fenestration set.
    pub fn new(
        template: GraftTemplate,
        options: PatternOptions,
        limits: ValidationLimits,
        layout: LayoutConfig,
    ) -> Result<Self> {
        template.validate()?;
        limits.validate()?;
        layout.validate()?;
        let set = FenestrationSet::new();
        let pattern = compute_pattern(&template, &set, &options, &layout)?;
        let id = Uuid::new_v4();
        info!(
            "Started planning session {} on {} ({}, {})",
            id,
            template.name,
            template.dimensions_label(),
            options.convention.label()
        );
        Ok(Self {
            id,
            template,
            options,
            limits,
            layout,
            set,
            pattern,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn template(&self) -> &GraftTemplate {
        &self.template
    }

    pub fn options(&self) -> &PatternOptions {
        &self.options
    }

    pub fn limits(&self) -> &ValidationLimits {
        &self.limits
    }

    pub fn fenestrations(&self) -> &FenestrationSet {
        &self.set
    }

    /// The pattern for the current state.
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    /// Resolves the angle, validates the entry and adds it.
    ///
    /// On error nothing changes and the violated constraint is returned.
    pub fn add(
        &mut self,
        vessel: Vessel,
        axial_distance: f64,
        angle: AngleInput,
        hole_diameter: f64,
    ) -> Result<&Pattern> {
        let _span = info_span!("session", id = %self.id).entered();
        let angle_degrees = angle.resolve(self.options.convention.anterior_hour)?;
        let candidate = Fenestration::new(vessel, axial_distance, angle_degrees, hole_diameter)?;
        let set = self.set.try_add(&self.template, candidate, &self.limits)?;
        self.commit(set)
    }

    /// Removes the entry at `index`.
    pub fn remove(&mut self, index: usize) -> Result<&Pattern> {
        let _span = info_span!("session", id = %self.id).entered();
        let set = self.set.remove(index)?;
        self.commit(set)
    }

    /// Drops every fenestration.
    pub fn clear(&mut self) -> Result<&Pattern> {
        self.commit(FenestrationSet::new())
    }

    fn commit(&mut self, set: FenestrationSet) -> Result<&Pattern> {
        let pattern = compute_pattern(&self.template, &set, &self.options, &self.layout)?;
        debug!("Session {} now has {} fenestration(s)", self.id, set.len());
        self.set = set;
        self.pattern = pattern;
        Ok(&self.pattern)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graftmark_core::{AngleConvention, CenteringMode, Error, YOrientation};

    fn session() -> PlanningSession {
        let template = GraftTemplate::new("device-a", "Device A", 24.0, 145.0).unwrap();
        let options = PatternOptions::new(
            AngleConvention::new(12, CenteringMode::Center).unwrap(),
            YOrientation::ProximalDown,
        );
        PlanningSession::new(
            template,
            options,
            ValidationLimits::default(),
            LayoutConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn test_add_recomputes_pattern() {
        let mut s = session();
        assert!(s.pattern().fenestrations.is_empty());
        let p = s.add(Vessel::Sma, 50.0, AngleInput::Hour(12), 6.0).unwrap();
        assert_eq!(p.fenestrations.len(), 1);
        assert_eq!(p.fenestrations[0].center.y, 95.0);
    }

    #[test]
    fn test_rejected_add_keeps_state() {
        let mut s = session();
        s.add(Vessel::Sma, 50.0, AngleInput::Hour(12), 6.0).unwrap();
        let before = s.pattern().clone();

        let err = s.add(Vessel::CeliacTrunk, 53.0, AngleInput::Hour(1), 6.0).unwrap_err();
        assert!(err.is_collision());
        let err = s.add(Vessel::CeliacTrunk, 30.0, AngleInput::Hour(13), 6.0).unwrap_err();
        assert!(matches!(err, Error::InvalidAngle(_)));

        assert_eq!(s.fenestrations().len(), 1);
        assert_eq!(s.pattern(), &before);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut s = session();
        s.add(Vessel::CeliacTrunk, 30.0, AngleInput::Hour(12), 8.0).unwrap();
        s.add(Vessel::Sma, 50.0, AngleInput::Hour(12), 6.0).unwrap();
        assert!(s.remove(5).is_err());
        s.remove(0).unwrap();
        assert_eq!(s.pattern().fenestrations[0].vessel, Vessel::Sma);
        s.clear().unwrap();
        assert!(s.fenestrations().is_empty());
    }

    #[test]
    fn test_invalid_limits_are_rejected() {
        let template = GraftTemplate::new("device-a", "Device A", 24.0, 145.0).unwrap();
        let limits = ValidationLimits {
            min_spacing: -1.0,
            ..ValidationLimits::default()
        };
        assert!(PlanningSession::new(
            template,
            PatternOptions::default(),
            limits,
            LayoutConfig::default()
        )
        .is_err());
    }
}
