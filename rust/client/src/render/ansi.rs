use super::Scene;

/// One line per grid row, cells separated by two spaces, followed by an
/// empty line.
pub fn render(scene: &Scene) -> String {
    let mut out = String::new();
    for row in 0..scene.size {
        let line = (0..scene.size)
            .map(|col| cell_glyph(scene, (row, col)))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(&line);
        out.push('\n');
    }
    out.push('\n');

    out
}

fn cell_glyph(scene: &Scene, cell: (usize, usize)) -> &'static str {
    if scene.agent == cell {
        "x"
    } else if scene.targets.contains(&cell) {
        "T"
    } else {
        "o"
    }
}
