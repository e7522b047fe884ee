use egui_macroquad::egui;
use egui_plot::{Line, Plot, PlotPoints};
use flappy_evo::evolution::GenerationStats;
use std::collections::VecDeque;

const MAX_HISTORY_POINTS: usize = 500;

pub struct UIState {
    pub simulation_speed: f32,
    pub show_sensor_lines: bool,
    pub paused: bool,
    best_fitness_history: VecDeque<(f64, f64)>,
    mean_fitness_history: VecDeque<(f64, f64)>,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            simulation_speed: 1.0,
            show_sensor_lines: true,
            paused: false,
            best_fitness_history: VecDeque::new(),
            mean_fitness_history: VecDeque::new(),
        }
    }

    pub fn record(&mut self, stats: &GenerationStats) {
        let x = f64::from(stats.generation);
        self.best_fitness_history
            .push_back((x, f64::from(stats.best_fitness)));
        self.mean_fitness_history
            .push_back((x, f64::from(stats.mean_fitness)));

        if self.best_fitness_history.len() > MAX_HISTORY_POINTS {
            self.best_fitness_history.pop_front();
        }
        if self.mean_fitness_history.len() > MAX_HISTORY_POINTS {
            self.mean_fitness_history.pop_front();
        }
    }
}

/// What the panel shows about the run in progress.
pub struct PanelInfo {
    pub generation: Option<u32>,
    pub alive: usize,
    pub score: u32,
    pub ticks: u64,
}

pub fn draw_ui(state: &mut UIState, info: &PanelInfo) {
    egui_macroquad::ui(|egui_ctx| {
        let mut visuals = egui::Visuals::dark();
        visuals.override_text_color = Some(egui::Color32::from_rgb(240, 240, 240));
        egui_ctx.set_visuals(visuals);

        egui::SidePanel::right("stats_panel")
            .default_width(300.0)
            .resizable(true)
            .show(egui_ctx, |ui| {
                ui.heading(if info.generation.is_some() { "Training" } else { "Playback" });
                ui.separator();

                ui.label("Simulation Speed");
                ui.add(egui::Slider::new(&mut state.simulation_speed, 0.1..=50.0).text("x"));
                ui.horizontal(|ui| {
                    let button_text = if state.paused { "▶ Resume" } else { "⏸ Pause" };
                    if ui.button(button_text).clicked() {
                        state.paused = !state.paused;
                    }
                    ui.checkbox(&mut state.show_sensor_lines, "Sensor lines");
                });

                ui.separator();

                if let Some(generation) = info.generation {
                    ui.label(format!("Generation: {}", generation));
                }
                ui.label(format!("Alive: {}", info.alive));
                ui.label(format!("Score: {}", info.score));
                ui.label(format!("Ticks: {}", info.ticks));

                if info.generation.is_some() {
                    ui.separator();
                    ui.heading("Fitness per Generation");
                    draw_fitness_plot(
                        ui,
                        &state.best_fitness_history,
                        &state.mean_fitness_history,
                    );
                }
            });
    });
}

fn draw_fitness_plot(
    ui: &mut egui::Ui,
    best_data: &VecDeque<(f64, f64)>,
    mean_data: &VecDeque<(f64, f64)>,
) {
    if best_data.is_empty() {
        ui.label("Waiting for the first generation...");
        return;
    }

    Plot::new("fitness_plot")
        .height(150.0)
        .width(280.0)
        .show_axes([true, true])
        .legend(egui_plot::Legend::default())
        .label_formatter(|name, value| {
            format!("{}\nGeneration: {:.0}\nFitness: {:.1}", name, value.x, value.y)
        })
        .show(ui, |plot_ui| {
            let best_points: PlotPoints = best_data.iter().map(|&(x, y)| [x, y]).collect();
            let best_line = Line::new(best_points)
                .color(egui::Color32::from_rgb(100, 200, 100))
                .name("Best");
            plot_ui.line(best_line);

            let mean_points: PlotPoints = mean_data.iter().map(|&(x, y)| [x, y]).collect();
            let mean_line = Line::new(mean_points)
                .color(egui::Color32::from_rgb(100, 150, 255))
                .name("Mean");
            plot_ui.line(mean_line);
        });
}

pub fn process_egui() {
    egui_macroquad::draw();
}
