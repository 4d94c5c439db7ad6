use crate::terrain::events::*;
use crate::terrain::resources::{CurrentTerrain, DebugPanelWidth, TerrainSettings};
use bevy::app::AppExit;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, egui};
use terraingen::world::TerrainStats;

pub fn render_terrain_debug_ui(
    mut contexts: EguiContexts,
    mut settings: ResMut<TerrainSettings>,
    current_terrain: Res<CurrentTerrain>,
    mut panel_width: ResMut<DebugPanelWidth>,
    mut regenerate_events: MessageWriter<RegenerateTerrainEvent>,
    mut generate_new_seed_events: MessageWriter<GenerateNewSeedEvent>,
    mut app_exit_events: MessageWriter<AppExit>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let stats = current_terrain.world.as_ref().map(|world| world.stats());

    let panel = egui::SidePanel::right("terrain_panel")
        .default_width(280.0)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.heading("Terrain");
                ui.add_space(10.0);

                render_generation_section(
                    ui,
                    &mut settings,
                    &mut regenerate_events,
                    &mut generate_new_seed_events,
                );

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                render_tools_section(ui, &mut settings);

                ui.add_space(10.0);
                ui.separator();
                ui.add_space(10.0);

                if let Some(stats) = stats {
                    render_stats(ui, &stats);
                }

                ui.add_space(20.0);
                ui.separator();
                ui.add_space(10.0);

                if ui.button("Quit").clicked() {
                    app_exit_events.write(AppExit::Success);
                }
            });
        });

    panel_width.0 = panel.response.rect.width();
}

fn render_generation_section(
    ui: &mut egui::Ui,
    settings: &mut TerrainSettings,
    regenerate_events: &mut MessageWriter<RegenerateTerrainEvent>,
    generate_new_seed_events: &mut MessageWriter<GenerateNewSeedEvent>,
) {
    ui.label("Seed");
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut settings.config.world.seed).speed(0.1));
        if ui.button("Random").clicked() {
            generate_new_seed_events.write(GenerateNewSeedEvent);
        }
    });

    ui.label("Seed code");
    ui.horizontal(|ui| {
        ui.add(egui::DragValue::new(&mut settings.seed_code));
        if ui.button("Use code").clicked() {
            settings.config.world.seed = terraingen::tools::seed_from_code(settings.seed_code);
            regenerate_events.write(RegenerateTerrainEvent);
        }
    });
    ui.add_space(5.0);

    // takes effect on the next regeneration
    ui.label("Terrain Threshold");
    ui.add(egui::Slider::new(&mut settings.config.world.terrain_threshold, 0.0..=1.0).step_by(0.01));

    ui.label("Edge Thickness");
    ui.add(egui::Slider::new(&mut settings.config.world.edge_thickness, 0.0..=32.0).step_by(0.5));

    ui.label("View Distance (chunks)");
    ui.add(egui::Slider::new(&mut settings.config.streaming.view_distance, 0..=8));
    ui.checkbox(
        &mut settings.config.streaming.deactivate_outside,
        "Hide chunks out of view",
    );
    ui.add_space(5.0);

    ui.horizontal(|ui| {
        if ui.button("Regenerate").clicked() {
            regenerate_events.write(RegenerateTerrainEvent);
        }
        if ui.button("Reload config file").clicked() {
            match terraingen::reload_config() {
                Ok(()) => {
                    settings.config = terraingen::get_config();
                    regenerate_events.write(RegenerateTerrainEvent);
                }
                Err(err) => warn!("Config not reloaded: {err}"),
            }
        }
    });
}

fn render_tools_section(ui: &mut egui::Ui, settings: &mut TerrainSettings) {
    ui.heading("Tools");
    ui.add_space(5.0);

    ui.label("Pickaxe Radius (left click)");
    ui.add(egui::Slider::new(&mut settings.pickaxe_radius, 0.5..=5.0).step_by(0.1));

    ui.label("TNT Radius (right click)");
    ui.add(egui::Slider::new(&mut settings.tnt_radius, 1.0..=20.0).step_by(0.5));

    ui.label("TNT Fuse (s)");
    ui.add(egui::Slider::new(&mut settings.tnt_fuse_secs, 0.1..=5.0).step_by(0.1));

    ui.checkbox(&mut settings.clear_around_viewer, "Clear around camera");
    ui.label("Clear Radius");
    ui.add(
        egui::Slider::new(&mut settings.config.streaming.clear_radius, 0.5..=10.0).step_by(0.1),
    );

    ui.checkbox(&mut settings.show_colliders, "Show colliders");
}

fn render_stats(ui: &mut egui::Ui, stats: &TerrainStats) {
    ui.heading("Stats");
    ui.add_space(5.0);
    egui::Grid::new("terrain_stats").num_columns(2).show(ui, |ui| {
        for (label, value) in [
            ("Chunks", stats.chunks),
            ("Active chunks", stats.active_chunks),
            ("Solid nodes", stats.solid_nodes),
            ("Triangles", stats.triangles),
            ("Collider paths", stats.collider_paths),
        ] {
            ui.label(label);
            ui.label(value.to_string());
            ui.end_row();
        }
    });
}
