//! Canvas 2D rendering
//!
//! A pure function of the current simulation state: nothing here writes back
//! into the sim. Cosmetic jitter uses the platform RNG on purpose - it must
//! never advance the simulation's seeded stream.

use web_sys::CanvasRenderingContext2d;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Bounds, FixtureModel, GamePhase, GameState};

/// Grid cell size in pixels
const GRID_STEP: f64 = 50.0;

/// Draw one complete frame.
pub fn draw_frame(
    ctx: &CanvasRenderingContext2d,
    state: &GameState,
    bounds: &Bounds,
    settings: &Settings,
) {
    let w = bounds.width as f64;
    let h = bounds.height as f64;

    // Background
    ctx.set_fill_style_str(COLOR_BACKGROUND);
    ctx.fill_rect(0.0, 0.0, w, h);

    if settings.grid {
        draw_grid(ctx, w, h);
    }
    draw_power_ups(ctx, state, settings);
    draw_enemies(ctx, state, settings);
    if state.phase != GamePhase::GameOver {
        draw_player(ctx, state, settings);
    }
    if settings.particles {
        draw_particles(ctx, state);
    }
}

fn draw_grid(ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
    ctx.set_stroke_style_str(COLOR_GRID);
    ctx.set_line_width(1.0);
    let mut x = 0.0;
    while x < w {
        ctx.begin_path();
        ctx.move_to(x, 0.0);
        ctx.line_to(x, h);
        ctx.stroke();
        x += GRID_STEP;
    }
    let mut y = 0.0;
    while y < h {
        ctx.begin_path();
        ctx.move_to(0.0, y);
        ctx.line_to(w, y);
        ctx.stroke();
        y += GRID_STEP;
    }
}

fn draw_power_ups(ctx: &CanvasRenderingContext2d, state: &GameState, settings: &Settings) {
    for orb in &state.power_ups {
        ctx.save();
        let _ = ctx.translate(orb.pos.x as f64, orb.pos.y as f64);
        ctx.set_fill_style_str(COLOR_ORB);
        if settings.glow {
            ctx.set_shadow_blur(15.0);
            ctx.set_shadow_color(COLOR_ORB);
        }
        ctx.begin_path();
        let _ = ctx.arc(0.0, 0.0, orb.size.x as f64 / 2.0, 0.0, std::f64::consts::TAU);
        ctx.fill();

        // Wandering sparkle in the core
        ctx.set_fill_style_str(COLOR_CORE);
        let (sx, sy) = if settings.effective_flicker() {
            (
                js_sys::Math::random() * 4.0 - 2.0,
                js_sys::Math::random() * 4.0 - 2.0,
            )
        } else {
            (0.0, 0.0)
        };
        ctx.begin_path();
        let _ = ctx.arc(sx, sy, 2.0, 0.0, std::f64::consts::TAU);
        ctx.fill();
        ctx.restore();
    }
}

fn draw_enemies(ctx: &CanvasRenderingContext2d, state: &GameState, settings: &Settings) {
    for enemy in &state.enemies {
        let ew = enemy.size.x as f64;
        let eh = enemy.size.y as f64;

        ctx.save();
        let _ = ctx.translate(enemy.pos.x as f64, enemy.pos.y as f64);
        if settings.effective_flicker() {
            // Unsteady housing: the whole box trembles a pixel either way
            let _ = ctx.translate(
                js_sys::Math::random() * 2.0 - 1.0,
                js_sys::Math::random() * 2.0 - 1.0,
            );
        }
        if settings.glow {
            ctx.set_shadow_blur(15.0);
            ctx.set_shadow_color(COLOR_ENEMY);
        }

        // Dark housing
        ctx.set_fill_style_str("#333333");
        ctx.fill_rect(-ew / 2.0, -eh / 2.0, ew, eh);

        // Harsh diffuser, flickering between sickly yellow and red
        let harsh = if settings.effective_flicker() && js_sys::Math::random() > 0.5 {
            "#fef08a"
        } else {
            COLOR_ENEMY
        };
        ctx.set_fill_style_str(harsh);
        ctx.fill_rect(-ew / 2.0 + 3.0, -eh / 2.0 + 3.0, ew - 6.0, eh - 6.0);

        // Brand stamp
        ctx.set_fill_style_str("#000000");
        ctx.set_font("bold 9px Arial");
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        let _ = ctx.fill_text("GLOOM", 0.0, 0.0);

        ctx.restore();
    }
}

fn draw_player(ctx: &CanvasRenderingContext2d, state: &GameState, settings: &Settings) {
    let player = &state.player;
    let w = player.size.x as f64;
    let h = player.size.y as f64;

    ctx.save();
    let _ = ctx.translate(player.pos.x as f64, player.pos.y as f64);
    if settings.glow {
        ctx.set_shadow_blur(25.0);
        ctx.set_shadow_color(COLOR_PLAYER);
    }

    match player.model {
        FixtureModel::Compact => {
            // Rounded square with a microprism dot texture
            ctx.set_fill_style_str("#f8fafc");
            rounded_rect_path(ctx, -w / 2.0, -h / 2.0, w, h, 8.0);
            ctx.fill();

            ctx.set_fill_style_str("rgba(56, 189, 248, 0.2)");
            let spacing = 5.0;
            let mut x = -w / 2.0 + 3.0;
            while x < w / 2.0 - 3.0 {
                let mut y = -h / 2.0 + 3.0;
                while y < h / 2.0 - 3.0 {
                    ctx.fill_rect(x, y, 2.0, 2.0);
                    y += spacing;
                }
                x += spacing;
            }

            ctx.set_stroke_style_str("#cbd5e1");
            ctx.set_line_width(2.0);
            rounded_rect_path(ctx, -w / 2.0, -h / 2.0, w, h, 8.0);
            ctx.stroke();
        }
        FixtureModel::Linear => {
            // Long batten with louvre sections
            ctx.set_fill_style_str("#f8fafc");
            ctx.fill_rect(-w / 2.0, -h / 2.0, w, h);

            let sections = 10.0;
            let section_w = w / sections;
            let mut i = 0.0;
            while i < sections {
                ctx.set_fill_style_str("#94a3b8");
                ctx.fill_rect(-w / 2.0 + i * section_w, -h / 2.0, 2.0, h);

                ctx.set_fill_style_str("rgba(56, 189, 248, 0.4)");
                ctx.fill_rect(
                    -w / 2.0 + i * section_w + 2.0,
                    -h / 2.0 + 2.0,
                    section_w - 4.0,
                    h - 4.0,
                );
                i += 1.0;
            }

            ctx.set_stroke_style_str("#ffffff");
            ctx.set_line_width(3.0);
            ctx.stroke_rect(-w / 2.0, -h / 2.0, w, h);
        }
    }

    ctx.restore();
}

fn draw_particles(ctx: &CanvasRenderingContext2d, state: &GameState) {
    for p in &state.particles {
        ctx.save();
        ctx.set_global_alpha(p.alpha.clamp(0.0, 1.0) as f64);
        ctx.set_fill_style_str(p.color);
        ctx.fill_rect(p.pos.x as f64, p.pos.y as f64, p.size as f64, p.size as f64);
        ctx.restore();
    }
}

/// Trace a rounded-rectangle path (does not fill or stroke).
fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    ctx.quadratic_curve_to(x + w, y, x + w, y + r);
    ctx.line_to(x + w, y + h - r);
    ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
    ctx.line_to(x + r, y + h);
    ctx.quadratic_curve_to(x, y + h, x, y + h - r);
    ctx.line_to(x, y + r);
    ctx.quadratic_curve_to(x, y, x + r, y);
    ctx.close_path();
}
