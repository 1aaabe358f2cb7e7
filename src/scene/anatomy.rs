//! Fixed layout of the stylised heart, in heart-local coordinates.
//!
//! Built once at startup. The only randomness is in the Purkinje fans,
//! whose fiber lengths differ between seeds.

use glam::Vec2;
use log::info;
use rand::Rng;
use strum::{Display, EnumIter};

use crate::animation::ConductionPaths;
use crate::geometry::{FiberFan, Path, PathId};
use crate::render::Color;
use crate::scene::palette::Neon;
use crate::units::Degrees;

const fn p(x: f32, y: f32) -> Vec2 {
    Vec2::new(x, y)
}

const SA_NODE: Vec2 = p(310.0, 130.0);
const AV_NODE: Vec2 = p(340.0, 210.0);
const HIS_BUNDLE: Vec2 = p(360.0, 240.0);
const LEFT_BUNDLE_ORIGIN: Vec2 = p(385.0, 275.0);
const PURKINJE_BASELINE: f32 = 360.0;
const PURKINJE_REACH: std::ops::RangeInclusive<f32> = 60.0..=130.0;
const PURKINJE_SPREAD: (Degrees, Degrees) = (Degrees(-45.0), Degrees(45.0));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum VesselKind {
    Aorta,
    #[strum(to_string = "Pulmonary Artery")]
    PulmonaryArtery,
    #[strum(to_string = "Pulmonary Veins")]
    PulmonaryVein,
    #[strum(to_string = "SVC")]
    SuperiorVenaCava,
    #[strum(to_string = "IVC")]
    InferiorVenaCava,
    #[strum(to_string = "RCA")]
    RightCoronary,
    #[strum(to_string = "LAD")]
    LeftAnteriorDescending,
    Circumflex,
    Brachiocephalic,
    #[strum(to_string = "Left Common Carotid")]
    LeftCommonCarotid,
    #[strum(to_string = "Left Subclavian")]
    LeftSubclavian,
}

/// How a vessel is stroked
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub glow_layers: u8,
}

/// Where a vessel's name goes: a sample picked by ratio plus an offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    pub ratio: f32,
    pub offset: Vec2,
}

impl VesselKind {
    /// Great vessels carry flow particles, coronaries and arch branches do not
    pub fn carries_flow(self) -> bool {
        matches!(
            self,
            VesselKind::Aorta
                | VesselKind::PulmonaryArtery
                | VesselKind::PulmonaryVein
                | VesselKind::SuperiorVenaCava
                | VesselKind::InferiorVenaCava
        )
    }

    pub fn stroke(self) -> Stroke {
        let (color, width, glow_layers) = match self {
            VesselKind::Aorta => (Neon::Vessel, 6.0, 7),
            VesselKind::PulmonaryArtery
            | VesselKind::SuperiorVenaCava
            | VesselKind::InferiorVenaCava => (Neon::Vessel, 5.0, 7),
            VesselKind::PulmonaryVein => (Neon::Vessel, 4.0, 6),
            _ => (Neon::Coronary, 3.0, 6),
        };
        Stroke {
            color: color.color(),
            width,
            glow_layers,
        }
    }

    pub fn label(self) -> Option<LabelPlacement> {
        let (ratio, offset) = match self {
            VesselKind::Aorta => (0.25, p(16.0, -10.0)),
            VesselKind::PulmonaryArtery => (0.35, p(10.0, -16.0)),
            VesselKind::PulmonaryVein => (0.4, p(10.0, -10.0)),
            VesselKind::SuperiorVenaCava => (0.9, p(-8.0, -20.0)),
            VesselKind::InferiorVenaCava => (0.9, p(10.0, 5.0)),
            _ => return None,
        };
        Some(LabelPlacement { ratio, offset })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vessel {
    pub kind: VesselKind,
    pub path: PathId,
}

/// Pacemaker lead, drawn as a single cubic curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lead {
    pub from: Vec2,
    pub control_a: Vec2,
    pub control_b: Vec2,
    pub to: Vec2,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Chamber {
    pub name: &'static str,
    pub outline: Vec<Vec2>,
    pub label_anchor: Vec2,
}

#[derive(Debug, Clone)]
pub struct Anatomy {
    /// Geometry table that vessels and particles index into
    pub paths: Vec<Path>,
    pub vessels: Vec<Vessel>,
    pub conduction: ConductionPaths,
    pub atrial_lead: Lead,
    pub ventricular_lead: Lead,
    pub atria: [Chamber; 2],
    pub ventricles: [Chamber; 2],
}

impl Anatomy {
    pub fn build(rng: &mut impl Rng) -> Self {
        let mut anatomy = Self {
            paths: Vec::new(),
            vessels: Vec::new(),
            conduction: conduction(rng),
            atrial_lead: Lead {
                from: p(-50.0, 210.0),
                control_a: p(120.0, 200.0),
                control_b: p(240.0, 185.0),
                to: p(345.0, 170.0),
            },
            ventricular_lead: Lead {
                from: p(-50.0, 230.0),
                control_a: p(130.0, 240.0),
                control_b: p(250.0, 260.0),
                to: p(370.0, 330.0),
            },
            atria: atria(),
            ventricles: ventricles(),
        };
        use VesselKind::*;
        let vessels: [(VesselKind, &[Vec2], usize); 13] = [
            (
                Aorta,
                &[
                    p(410.0, 180.0),
                    p(480.0, 130.0),
                    p(520.0, 110.0),
                    p(560.0, 150.0),
                    p(530.0, 180.0),
                    p(500.0, 200.0),
                    p(460.0, 220.0),
                ],
                80,
            ),
            (
                PulmonaryArtery,
                &[p(380.0, 190.0), p(430.0, 160.0), p(470.0, 170.0), p(520.0, 210.0)],
                60,
            ),
            (
                PulmonaryVein,
                &[p(520.0, 270.0), p(555.0, 272.0), p(575.0, 285.0), p(590.0, 300.0)],
                24,
            ),
            (
                PulmonaryVein,
                &[p(510.0, 290.0), p(545.0, 305.0), p(565.0, 318.0), p(585.0, 330.0)],
                24,
            ),
            (
                SuperiorVenaCava,
                &[p(320.0, 90.0), p(318.0, 65.0), p(315.0, 40.0), p(312.0, 20.0)],
                24,
            ),
            (
                InferiorVenaCava,
                &[p(330.0, 390.0), p(330.0, 420.0), p(330.0, 450.0), p(330.0, 470.0)],
                28,
            ),
            (
                RightCoronary,
                &[p(420.0, 185.0), p(400.0, 210.0), p(380.0, 235.0), p(360.0, 260.0)],
                36,
            ),
            (
                RightCoronary,
                &[p(360.0, 260.0), p(348.0, 285.0), p(343.0, 305.0), p(340.0, 320.0)],
                28,
            ),
            (
                LeftAnteriorDescending,
                &[p(430.0, 210.0), p(435.0, 245.0), p(438.0, 285.0), p(440.0, 320.0)],
                36,
            ),
            (
                Circumflex,
                &[p(430.0, 210.0), p(455.0, 230.0), p(475.0, 255.0), p(490.0, 280.0)],
                28,
            ),
            (
                Brachiocephalic,
                &[p(520.0, 118.0), p(515.0, 95.0), p(510.0, 78.0), p(505.0, 70.0)],
                20,
            ),
            (
                LeftCommonCarotid,
                &[p(535.0, 115.0), p(540.0, 92.0), p(545.0, 75.0), p(548.0, 65.0)],
                20,
            ),
            (
                LeftSubclavian,
                &[p(552.0, 125.0), p(565.0, 105.0), p(580.0, 90.0), p(592.0, 80.0)],
                20,
            ),
        ];
        for (kind, control_points, samples) in vessels {
            anatomy.add_vessel(kind, Path::from_control_points(control_points, samples));
        }
        info!(
            "Anatomy built: {} vessels, {} + {} Purkinje fibers",
            anatomy.vessels.len(),
            anatomy.conduction.right_bundle.len(),
            anatomy.conduction.left_bundle.len()
        );
        anatomy
    }

    fn add_vessel(&mut self, kind: VesselKind, path: Path) {
        let id = PathId(self.paths.len());
        self.paths.push(path);
        self.vessels.push(Vessel { kind, path: id });
    }

    pub fn path(&self, id: PathId) -> Option<&Path> {
        self.paths.get(id.0)
    }

    /// Paths that carry flow particles
    pub fn flow_paths(&self) -> Vec<PathId> {
        self.vessels
            .iter()
            .filter(|vessel| vessel.kind.carries_flow())
            .map(|vessel| vessel.path)
            .collect()
    }

    pub fn sa_node(&self) -> Vec2 {
        self.conduction.sa_to_av.first().unwrap_or(SA_NODE)
    }

    pub fn av_node(&self) -> Vec2 {
        self.conduction.sa_to_av.last().unwrap_or(AV_NODE)
    }
}

fn conduction(rng: &mut impl Rng) -> ConductionPaths {
    let sa_to_av = Path::from_control_points(&[SA_NODE, p(320.0, 160.0), p(330.0, 185.0), AV_NODE], 36);
    let his = Path::from_control_points(&[AV_NODE, HIS_BUNDLE, p(370.0, 260.0), p(380.0, 280.0)], 24);
    let right_bundle = FiberFan {
        origin: HIS_BUNDLE,
        count: 6,
        radius: PURKINJE_REACH,
        angles: PURKINJE_SPREAD,
        baseline_y: PURKINJE_BASELINE,
    }
    .generate(rng);
    let left_bundle = FiberFan {
        origin: LEFT_BUNDLE_ORIGIN,
        count: 7,
        radius: PURKINJE_REACH,
        angles: PURKINJE_SPREAD,
        baseline_y: PURKINJE_BASELINE,
    }
    .generate(rng);
    ConductionPaths {
        sa_to_av,
        his,
        right_bundle,
        left_bundle,
    }
}

fn atria() -> [Chamber; 2] {
    [
        Chamber {
            name: "Right Atrium",
            outline: vec![
                p(300.0, 150.0),
                p(270.0, 165.0),
                p(260.0, 195.0),
                p(285.0, 210.0),
                p(310.0, 205.0),
                p(320.0, 175.0),
            ],
            label_anchor: p(285.0, 145.0),
        },
        Chamber {
            name: "Left Atrium",
            outline: vec![
                p(345.0, 150.0),
                p(375.0, 160.0),
                p(395.0, 185.0),
                p(380.0, 205.0),
                p(355.0, 210.0),
                p(335.0, 190.0),
            ],
            label_anchor: p(370.0, 145.0),
        },
    ]
}

fn ventricles() -> [Chamber; 2] {
    [
        Chamber {
            name: "Right Ventricle",
            outline: vec![
                p(330.0, 220.0),
                p(300.0, 260.0),
                p(295.0, 300.0),
                p(305.0, 340.0),
                p(330.0, 360.0),
                p(360.0, 350.0),
                p(370.0, 320.0),
                p(360.0, 280.0),
            ],
            label_anchor: p(300.0, 375.0),
        },
        Chamber {
            name: "Left Ventricle",
            outline: vec![
                p(370.0, 220.0),
                p(395.0, 245.0),
                p(405.0, 280.0),
                p(405.0, 320.0),
                p(395.0, 350.0),
                p(370.0, 370.0),
                p(340.0, 360.0),
                p(345.0, 300.0),
            ],
            label_anchor: p(385.0, 380.0),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use strum::IntoEnumIterator;

    fn anatomy() -> Anatomy {
        Anatomy::build(&mut ChaCha8Rng::seed_from_u64(11))
    }

    #[test]
    fn test_every_vessel_kind_is_present() {
        let anatomy = anatomy();
        for kind in VesselKind::iter() {
            assert!(
                anatomy.vessels.iter().any(|vessel| vessel.kind == kind),
                "{kind} missing"
            );
        }
        assert_eq!(anatomy.vessels.len(), anatomy.paths.len());
    }

    #[test]
    fn test_all_layout_paths_are_well_formed() {
        let anatomy = anatomy();
        for vessel in &anatomy.vessels {
            assert!(anatomy.path(vessel.path).unwrap().is_traversable());
        }
        // 2 segments of 80 samples
        let aorta = anatomy.vessels[0];
        assert_eq!(anatomy.path(aorta.path).unwrap().len(), 161);
        assert_eq!(anatomy.conduction.sa_to_av.len(), 37);
        assert_eq!(anatomy.conduction.his.len(), 25);
    }

    #[test]
    fn test_flow_paths_are_great_vessels() {
        let anatomy = anatomy();
        let flow = anatomy.flow_paths();
        assert_eq!(flow.len(), 6);
        for id in flow {
            let vessel = anatomy.vessels.iter().find(|v| v.path == id).unwrap();
            assert!(vessel.kind.carries_flow());
        }
    }

    #[test]
    fn test_nodes_sit_at_conduction_path_ends() {
        let anatomy = anatomy();
        assert_eq!(anatomy.sa_node(), SA_NODE);
        assert_eq!(anatomy.av_node(), AV_NODE);
        assert_eq!(anatomy.conduction.his.first(), Some(AV_NODE));
    }

    #[test]
    fn test_purkinje_fans() {
        let anatomy = anatomy();
        assert_eq!(anatomy.conduction.right_bundle.len(), 6);
        assert_eq!(anatomy.conduction.left_bundle.len(), 7);
        for fiber in anatomy.conduction.left_bundle.fibers() {
            assert_eq!(fiber.origin, LEFT_BUNDLE_ORIGIN);
        }
    }

    #[test]
    fn test_vessel_labels() {
        assert_eq!(VesselKind::PulmonaryArtery.to_string(), "Pulmonary Artery");
        assert!(VesselKind::Aorta.label().is_some());
        assert!(VesselKind::Circumflex.label().is_none());
        assert_eq!(VesselKind::Brachiocephalic.stroke().color, Neon::Coronary.color());
    }
}
