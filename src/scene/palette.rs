use strum::EnumIter;

use crate::render::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Neon {
    Background,
    Magenta,
    Ventricle,
    Vessel,
    Coronary,
    Node,
    Lead,
    Pacer,
    Green,
    Cyan,
    White,
    /// Sinus impulse that never reaches the ventricles
    Amber,
    /// Pacemaker indicator when its chamber is not being paced
    Idle,
    /// Legend swatch when a pacing channel is not firing
    Unpaced,
    FlowCyan,
    FlowGreen,
}

impl Neon {
    pub const fn color(self) -> Color {
        match self {
            Neon::Background => Color::rgb(5, 6, 12),
            Neon::Magenta => Color::rgb(255, 0, 190),
            Neon::Ventricle => Color::rgb(255, 40, 60),
            Neon::Vessel => Color::rgb(80, 200, 255),
            Neon::Coronary => Color::rgb(255, 120, 0),
            Neon::Node => Color::rgb(255, 220, 0),
            Neon::Lead => Color::rgb(70, 160, 255),
            Neon::Pacer => Color::rgb(60, 120, 255),
            Neon::Green => Color::rgb(0, 255, 140),
            Neon::Cyan => Color::rgb(0, 255, 255),
            Neon::White => Color::rgb(245, 245, 245),
            Neon::Amber => Color::rgb(255, 200, 0),
            Neon::Idle => Color::rgb(140, 160, 180),
            Neon::Unpaced => Color::gray(170),
            Neon::FlowCyan => Color::rgb(0, 220, 255),
            Neon::FlowGreen => Color::rgb(0, 255, 180),
        }
    }
}

/// Colors a flow particle may be given
pub const FLOW_COLORS: [Color; 3] = [
    Neon::Vessel.color(),
    Neon::FlowCyan.color(),
    Neon::FlowGreen.color(),
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use strum::IntoEnumIterator;

    #[test]
    fn test_palette_entries_are_distinct() {
        let colors: HashSet<Color> = Neon::iter().map(Neon::color).collect();
        assert_eq!(colors.len(), Neon::iter().count());
    }
}
