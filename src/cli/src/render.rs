use cube_core::{CubeState, CubieId, Face, Facelet};
use owo_colors::OwoColorize;
use solver::ColorScheme;

/// One sticker as a coloured block showing its label
fn sticker(label: Face, scheme: &ColorScheme, highlight: bool) -> String {
    let text = if highlight {
        format!("[{label}]")
    } else {
        format!(" {label} ")
    };

    match scheme.color_of(label).to_ascii_lowercase().as_str() {
        "white" => text.black().on_white().to_string(),
        "yellow" => text.black().on_yellow().to_string(),
        "red" => text.white().on_red().to_string(),
        "orange" => text.black().on_truecolor(255, 140, 0).to_string(),
        "green" => text.black().on_green().to_string(),
        "blue" => text.white().on_blue().to_string(),
        _ => text,
    }
}

/// Lays out three character wide cells as an unfolded cube: U on top, L F R B
/// across the middle, and D at the bottom.
fn layout(cell: impl Fn(Facelet) -> String) -> String {
    let row = |face: Face, row: u8| -> String {
        (0..3)
            .map(|col| cell(Facelet::new(face, row, col)))
            .collect()
    };

    let mut out = String::new();
    for r in 0..3 {
        out.push_str(&format!("         {}\n", row(Face::U, r)));
    }
    for r in 0..3 {
        for face in [Face::L, Face::F, Face::R, Face::B] {
            out.push_str(&row(face, r));
        }
        out.push('\n');
    }
    for r in 0..3 {
        out.push_str(&format!("         {}\n", row(Face::D, r)));
    }
    out
}

/// The cube's stickers. Facelets of fixed pieces are bracketed.
pub fn net(state: &CubeState, scheme: &ColorScheme, fixed: &[Facelet]) -> String {
    layout(|facelet| sticker(state.facelet(facelet), scheme, fixed.contains(&facelet)))
}

/// The number each facelet is picked by
pub fn numbering() -> String {
    layout(|facelet| format!("{:>3}", CubieId::from_facelet(facelet).get()))
}
