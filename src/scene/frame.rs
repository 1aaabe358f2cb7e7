//! Turns one frame of simulation state into draw commands.

use glam::Vec2;
use strum::IntoEnumIterator;

use crate::animation::SparkKind;
use crate::render::{Canvas, Color, Renderer, TextAlign};
use crate::scene::anatomy::{Chamber, Lead, VesselKind};
use crate::scene::palette::Neon;
use crate::scene::state::{Frame, SimulationState};

/// Horizontal share of the canvas the whole picture is shifted by
const CANVAS_INSET: f32 = 0.12;
const HEART_OFFSET: Vec2 = Vec2::new(200.0, 70.0);
const PACEMAKER_OFFSET: Vec2 = Vec2::new(70.0, 160.0);
const ATRIA_LIFT: Vec2 = Vec2::new(0.0, -10.0);
const LEGEND_ROW_HEIGHT: f32 = 24.0;

pub fn draw(state: &SimulationState, frame: &Frame, renderer: &mut dyn Renderer) {
    let canvas_size = state.config().canvas;
    let mut canvas = Canvas::new(renderer);
    canvas.clear(Neon::Background.color());
    canvas.translate(Vec2::new(canvas_size.width * CANVAS_INSET, 0.0));

    draw_title(&mut canvas);
    draw_pacemaker(&mut canvas, frame);

    canvas.push();
    canvas.translate(HEART_OFFSET);
    draw_vessels(&mut canvas, state);
    let anatomy = state.anatomy();
    draw_chambers(&mut canvas, &anatomy.atria, frame.atrial_scale, ATRIA_LIFT, Neon::Magenta, 7.0, 8);
    draw_chambers(
        &mut canvas,
        &anatomy.ventricles,
        frame.ventricular_scale,
        Vec2::ZERO,
        Neon::Ventricle,
        8.0,
        10,
    );
    draw_conduction(&mut canvas, state, frame);
    draw_leads(&mut canvas, state, frame);
    draw_particles(&mut canvas, state);
    canvas.pop();

    draw_legend(&mut canvas, state, frame);

    let footer = format!(
        "{} | Neon stylised anatomy • Complete heart block • Dual-chamber pacing (RA → RV)",
        state.keyboard().legend()
    );
    canvas.text(
        &footer,
        Vec2::new(canvas_size.width / 2.0, canvas_size.height - 18.0),
        Color::gray(220),
        13.0,
        TextAlign::BaselineCenter,
        false,
    );
}

fn draw_title(canvas: &mut Canvas) {
    canvas.text(
        "Neon Heart • Dual-Chamber Pacemaker • Complete Heart Block",
        Vec2::new(22.0, 20.0),
        Color::gray(240),
        22.0,
        TextAlign::TopLeft,
        false,
    );
    canvas.text(
        "Atria (magenta) • Ventricles (red) • Vessels (cyan) • Conduction (gold) • Pacemaker (blue)",
        Vec2::new(22.0, 48.0),
        Color::gray(200),
        14.0,
        TextAlign::TopLeft,
        false,
    );
}

fn indicator(paced: bool, active: Neon) -> (Color, f32) {
    if paced {
        (active.color(), 10.0)
    } else {
        (Neon::Idle.color(), 7.0)
    }
}

fn draw_pacemaker(canvas: &mut Canvas, frame: &Frame) {
    canvas.push();
    canvas.translate(PACEMAKER_OFFSET);
    let pacer = Neon::Pacer.color();
    canvas.rounded_rect(Vec2::new(-100.0, -40.0), Vec2::new(90.0, 60.0), 16.0, pacer, 4.0, 10);
    canvas.glow_text("Pacemaker", Vec2::new(-55.0, -55.0), pacer, 12.0);
    for (label, x, paced, active) in [
        ("A", -85.0, frame.pacing.atrial, Neon::Cyan),
        ("V", -25.0, frame.pacing.ventricular, Neon::Green),
    ] {
        let (color, diameter) = indicator(paced, active);
        canvas.dot(Vec2::new(x, -22.0), color, diameter, 6);
        canvas.glow_text(label, Vec2::new(x, -36.0), color, 11.0);
    }
    canvas.pop();
}

fn draw_vessels(canvas: &mut Canvas, state: &SimulationState) {
    let anatomy = state.anatomy();
    for vessel in &anatomy.vessels {
        let Some(path) = anatomy.path(vessel.path) else {
            continue;
        };
        let stroke = vessel.kind.stroke();
        canvas.polyline(path.points(), stroke.color, stroke.width, stroke.glow_layers);
    }
    // one label per kind, on the first vessel of that kind
    for kind in VesselKind::iter() {
        let Some(placement) = kind.label() else {
            continue;
        };
        let anchor = anatomy
            .vessels
            .iter()
            .find(|vessel| vessel.kind == kind)
            .and_then(|vessel| anatomy.path(vessel.path))
            .and_then(|path| path.point_at_ratio(placement.ratio));
        if let Some(anchor) = anchor {
            canvas.glow_text(&kind.to_string(), anchor + placement.offset, Neon::Vessel.color(), 12.0);
        }
    }
}

fn draw_chambers(
    canvas: &mut Canvas,
    chambers: &[Chamber],
    scale: f32,
    lift: Vec2,
    neon: Neon,
    width: f32,
    glow_layers: u8,
) {
    let color = neon.color();
    canvas.push();
    canvas.translate(lift);
    canvas.scale(scale);
    for chamber in chambers {
        canvas.closed_curve(&chamber.outline, color, width, glow_layers);
    }
    canvas.pop();
    for chamber in chambers {
        canvas.glow_text(chamber.name, chamber.label_anchor, color, 12.0);
    }
}

fn draw_conduction(canvas: &mut Canvas, state: &SimulationState, frame: &Frame) {
    let anatomy = state.anatomy();
    let node = Neon::Node.color();
    let paced = frame.pacing.atrial;
    let (sa, av) = (anatomy.sa_node(), anatomy.av_node());

    canvas.dot(sa, node, if paced { 12.0 } else { 8.0 }, 6);
    canvas.glow_text("SA node", sa + Vec2::new(-10.0, -18.0), node, 11.0);
    canvas.dot(av, node, if paced { 10.0 } else { 7.0 }, 6);
    canvas.glow_text("AV node (blocked)", av + Vec2::new(8.0, 16.0), node, 11.0);

    let conduction = &anatomy.conduction;
    canvas.polyline(conduction.sa_to_av.points(), node, 2.4, 6);
    canvas.polyline(conduction.his.points(), node, 2.2, 6);
    for fiber in conduction
        .right_bundle
        .fibers()
        .iter()
        .chain(conduction.left_bundle.fibers())
    {
        canvas.segment(fiber.origin, fiber.end, node, 2.0, 5);
    }

    for spark in &frame.sparks {
        let (color, diameter) = match spark.kind {
            SparkKind::Atrial => (Neon::Cyan.color(), 7.0),
            SparkKind::Native => (Neon::Amber.color(), 7.0),
            SparkKind::His => (Neon::Green.color(), 7.0),
            SparkKind::Purkinje => (Neon::Green.color(), 6.0),
        };
        canvas.dot(spark.position, color, diameter, 6);
    }
}

fn draw_lead(canvas: &mut Canvas, lead: &Lead, paced: bool, active: Neon) {
    canvas.bezier(lead.from, lead.control_a, lead.control_b, lead.to, Neon::Lead.color(), 2.5, 7);
    if paced {
        canvas.segment(lead.from, lead.to, active.color(), 3.0, 6);
    }
}

fn draw_leads(canvas: &mut Canvas, state: &SimulationState, frame: &Frame) {
    let anatomy = state.anatomy();
    draw_lead(canvas, &anatomy.atrial_lead, frame.pacing.atrial, Neon::Cyan);
    draw_lead(canvas, &anatomy.ventricular_lead, frame.pacing.ventricular, Neon::Green);
}

fn draw_particles(canvas: &mut Canvas, state: &SimulationState) {
    for (position, particle) in state.particles().positions(&state.anatomy().paths) {
        canvas.dot(position, particle.color, particle.size + 2.0, 6);
    }
}

fn draw_legend(canvas: &mut Canvas, state: &SimulationState, frame: &Frame) {
    let origin = Vec2::new(state.config().canvas.width - 250.0, 120.0);
    canvas.glow_text("Legend", origin - Vec2::new(0.0, 26.0), Neon::White.color(), 14.0);
    let pace_row = |label: &str, paced: bool, active: Neon| {
        if paced {
            (format!("{label} (active)"), active.color())
        } else {
            (label.to_string(), Neon::Unpaced.color())
        }
    };
    let rows = [
        ("Atria".to_string(), Neon::Magenta.color()),
        ("Ventricles".to_string(), Neon::Ventricle.color()),
        ("Major vessels".to_string(), Neon::Vessel.color()),
        ("Conduction".to_string(), Neon::Node.color()),
        ("Pacemaker".to_string(), Neon::Pacer.color()),
        pace_row("Atrial pace", frame.pacing.atrial, Neon::Cyan),
        pace_row("Ventricular pace", frame.pacing.ventricular, Neon::Green),
    ];
    for (row, (label, color)) in rows.iter().enumerate() {
        let anchor = origin + Vec2::new(0.0, row as f32 * LEGEND_ROW_HEIGHT);
        canvas.dot(anchor, *color, 8.0, 6);
        canvas.text(
            label,
            anchor + Vec2::new(16.0, 0.0),
            Color::gray(230),
            12.0,
            TextAlign::CenterLeft,
            false,
        );
    }
}
