use crate::entities::RawMesh;
use crate::{NestError, Result};

/// Rule mapping a mesh onto the factor converting its model units into millimetres.
#[derive(Clone, Copy, Debug)]
pub struct UnitRule {
    pub name: &'static str,
    /// Rules with a higher priority are evaluated first, equal priorities keep their list order
    pub priority: i32,
    pub predicate: fn(&RawMesh) -> bool,
    pub scale: f64,
}

/// Models exported in metres rarely contain coordinates of a kilometre or more.
pub const METRE_DETECTION_LIMIT: f64 = 1000.0;

/// Metres when every coordinate stays below [`METRE_DETECTION_LIMIT`], millimetres otherwise.
pub fn default_rules() -> Vec<UnitRule> {
    vec![
        UnitRule {
            name: "metres",
            priority: 10,
            predicate: |mesh| mesh.max_abs_coordinate() < METRE_DETECTION_LIMIT,
            scale: 1000.0,
        },
        UnitRule {
            name: "millimetres",
            priority: 0,
            predicate: |_| true,
            scale: 1.0,
        },
    ]
}

/// How model units are converted into millimetres.
#[derive(Clone, Debug)]
pub enum UnitScale {
    /// Same factor for every mesh
    Fixed(f64),
    /// Factor of the first matching rule, 1.0 if none matches
    Auto(Vec<UnitRule>),
}

impl Default for UnitScale {
    fn default() -> Self {
        UnitScale::Auto(default_rules())
    }
}

impl UnitScale {
    pub fn resolve(&self, mesh: &RawMesh) -> f64 {
        match self {
            UnitScale::Fixed(scale) => *scale,
            UnitScale::Auto(rules) => {
                let mut ordered: Vec<&UnitRule> = rules.iter().collect();
                ordered.sort_by_key(|r| std::cmp::Reverse(r.priority));
                ordered
                    .into_iter()
                    .find(|r| (r.predicate)(mesh))
                    .map_or(1.0, |r| r.scale)
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        let valid = |s: f64| s.is_finite() && s > 0.0;
        match self {
            UnitScale::Fixed(s) if !valid(*s) => Err(NestError::Configuration(format!(
                "unit scale must be a positive number, got {s}"
            ))),
            UnitScale::Auto(rules) => match rules.iter().find(|r| !valid(r.scale)) {
                Some(r) => Err(NestError::Configuration(format!(
                    "unit rule '{}' has an invalid scale {}",
                    r.name, r.scale
                ))),
                None => Ok(()),
            },
            UnitScale::Fixed(_) => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::ElementId;

    fn mesh_with_extent(extent: f64) -> RawMesh {
        RawMesh::new(
            ElementId(1),
            "IfcPlate",
            vec![[0.0, 0.0, 0.0], [extent, 0.0, 0.0], [0.0, extent, 0.01]],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn small_coordinates_are_metres() {
        assert_eq!(UnitScale::default().resolve(&mesh_with_extent(2.5)), 1000.0);
        assert_eq!(UnitScale::default().resolve(&mesh_with_extent(2500.0)), 1.0);
    }

    #[test]
    fn higher_priority_rule_wins() {
        let rules = vec![
            UnitRule {
                name: "any",
                priority: 1,
                predicate: |_| true,
                scale: 1.0,
            },
            UnitRule {
                name: "inches",
                priority: 5,
                predicate: |_| true,
                scale: 25.4,
            },
        ];
        assert_eq!(UnitScale::Auto(rules).resolve(&mesh_with_extent(1.0)), 25.4);
    }

    #[test]
    fn no_matching_rule_keeps_units() {
        assert_eq!(UnitScale::Auto(vec![]).resolve(&mesh_with_extent(1.0)), 1.0);
    }

    #[test]
    fn invalid_scales_are_rejected() {
        assert!(UnitScale::Fixed(0.0).validate().is_err());
        assert!(UnitScale::Fixed(f64::NAN).validate().is_err());
        assert!(UnitScale::Fixed(1000.0).validate().is_ok());
        assert!(UnitScale::default().validate().is_ok());
    }
}
