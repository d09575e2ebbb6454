use indicatif::{ProgressBar, ProgressStyle};

pub enum OutputColor {
    Green,
    Yellow,
    Red,
}

impl OutputColor {
    fn ansi_code(&self) -> u8 {
        match self {
            OutputColor::Green => 32,
            OutputColor::Yellow => 33,
            OutputColor::Red => 31,
        }
    }
}

/// Bold colored status word, right-aligned to a fixed column like cargo's output
pub fn get_formatted_left_output(output: &str, color: &OutputColor) -> String {
    format!("\x1b[1;{}m{output:>12}\x1b[0m", color.ansi_code())
}

pub fn create_new_pb(length: u64, prefix: &str) -> ProgressBar {
    let pb = ProgressBar::new(length);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{prefix:>12.cyan.bold} [{bar:40}] {pos}/{len}{msg}")
            .unwrap()
            .progress_chars("=> "),
    );
    pb.set_prefix(prefix.to_string());

    pb
}
