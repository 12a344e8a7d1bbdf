//! Demo viewer: renders a synthetic chromatogram with one highlighted base and
//! one mutation label. The real toolkit feeds records from its AB1 reader
//! instead.

use chromaplot::{annotate_mutation, highlight_base, plot_chromatograph, Axes, SeqRecordAb1, SitePair};
use eframe::{
    self,
    egui::{self, CentralPanel, ScrollArea, Ui},
};

const WINDOW_WIDTH: f32 = 1060.;
const WINDOW_HEIGHT: f32 = 480.;

const WINDOW_TITLE: &str = "Chromatogram viewer";

/// Per-base spacing of the synthetic trace, in trace units.
const PEAK_SPACING: f32 = 10.;

/// A made-up but plausible trace: one bump per called base on that base's
/// channel, with small shoulders bleeding onto the neighbors' channels.
fn demo_record() -> SeqRecordAb1 {
    let sequence = "ACGTGGTACN".to_owned();
    let channels = ['G', 'A', 'T', 'C'];

    let peak_locations: Vec<f32> = (0..sequence.len())
        .map(|i| i as f32 * PEAK_SPACING)
        .collect();
    let trace_x: Vec<f32> = (0..=(sequence.len() - 1) * 10)
        .map(|i| i as f32 * PEAK_SPACING / 10.)
        .collect();

    let mut data: [Vec<u16>; 4] = Default::default();
    for ch in &mut data {
        ch.resize(trace_x.len(), 0);
    }

    for (i, base) in sequence.chars().enumerate() {
        let center = peak_locations[i];
        for (ch_i, &ch_base) in channels.iter().enumerate() {
            // The called channel gets the tall bump; everything else gets noise.
            let amp = if ch_base == base { 900. } else { 80. };
            for (s, &x) in trace_x.iter().enumerate() {
                let d = (x - center) / (PEAK_SPACING * 0.35);
                let y = amp * (-d * d).exp();
                data[ch_i][s] = data[ch_i][s].saturating_add(y as u16);
            }
        }
    }

    let [data_ch1, data_ch2, data_ch3, data_ch4] = data;
    SeqRecordAb1 {
        id: "demo".to_owned(),
        name: "demo".to_owned(),
        description: "Synthetic chromatogram".to_owned(),
        sequence,
        peak_locations,
        trace_x,
        data_ch1,
        data_ch2,
        data_ch3,
        data_ch4,
        channels,
        ..Default::default()
    }
}

struct Viewer {
    record: SeqRecordAb1,
    axes: Axes,
}

impl Viewer {
    fn new() -> Self {
        let record = demo_record();

        let mut axes = plot_chromatograph(Some(&record), None, None).unwrap();
        highlight_base(5, &record, &mut axes, true).unwrap();
        highlight_base(7, &record, &mut axes, false).unwrap();
        annotate_mutation(
            &SitePair {
                ref_pos: 5,
                ref_base: 'A',
                cf_pos: 5,
                cf_base: 'G',
                cf_qual: Some(52),
            },
            &record,
            &mut axes,
        );

        Self { record, axes }
    }

    fn draw(&self, ui: &mut Ui) {
        ui.heading(format!("Chromatogram: {}", self.record.description));
        ui.label(format!("{} called bases", self.record.len()));
        ScrollArea::horizontal().show(ui, |ui| {
            self.axes.render(ui);
        });
    }
}

impl eframe::App for Viewer {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        CentralPanel::default().show(ctx, |ui| self.draw(ui));
    }
}

fn main() {
    tracing_subscriber::fmt::init();

    let viewer = Viewer::new();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT]),
        ..Default::default()
    };

    eframe::run_native(WINDOW_TITLE, options, Box::new(|_cc| Ok(Box::new(viewer)))).unwrap();
}
