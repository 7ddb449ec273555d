//! `Frame`: the 2D character grid that is the source of truth for rendering.

use fleet_core::{Cell, TaskId};
use fleet_model::{SpatialTarget, TaskStatus};
use fleet_sim::Snapshot;
use fleet_world::ZoneType;

/// A `height × width` grid of printable characters. Empty space is `' '`,
/// never anything else; every cell holds exactly one `char`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Frame {
    width:  usize,
    height: usize,
    cells:  Vec<char>,
}

impl Frame {
    /// A blank frame filled with spaces.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![' '; width * height],
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> char {
        self.cells[y * self.width + x]
    }

    /// Write `text` starting at `(x, y)`, clipping at the frame edges.
    pub fn stamp(&mut self, x: i64, y: i64, text: &str) {
        if y < 0 || y >= self.height as i64 {
            return;
        }
        for (i, ch) in text.chars().enumerate() {
            let cx = x + i as i64;
            if cx < 0 {
                continue;
            }
            if cx >= self.width as i64 {
                break;
            }
            self.cells[y as usize * self.width + cx as usize] = ch;
        }
    }

    /// Rows as `String`s, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.width).map(|row| row.iter().collect())
    }

    /// Human-readable dump (for tests and debugging).
    pub fn to_text(&self) -> String {
        self.rows().collect::<Vec<_>>().join("\n")
    }
}

// ── Snapshot rendering ────────────────────────────────────────────────────────

/// Glyph key:
///
/// | Glyph   | Meaning                                  |
/// |---------|------------------------------------------|
/// | `.`     | free cell                                |
/// | `#`     | obstacle                                 |
/// | `i m l r c` | zone cell, by zone type              |
/// | `?`     | unassigned task                          |
/// | `*`     | assigned or in-progress task             |
/// | `+`     | completed task                           |
/// | `x`     | failed task                              |
/// | `0`-`9` | robot (id modulo 10, drawn last)         |
pub fn render_snapshot(snapshot: &Snapshot) -> Frame {
    let env = snapshot.env();
    let mut frame = Frame::blank(env.width() as usize, env.height() as usize);

    // Terrain base layer.
    for y in 0..env.height() as i32 {
        for x in 0..env.width() as i32 {
            frame.stamp(x as i64, y as i64, ".");
        }
    }
    for zone in env.zones() {
        let glyph = zone_glyph(zone.zone_type());
        for cell in zone.cells() {
            stamp_cell(&mut frame, *cell, glyph);
        }
    }
    for &cell in env.obstacles() {
        stamp_cell(&mut frame, cell, "#");
    }

    // Tasks with a concrete target; zone-targeted tasks are already visible
    // as their zone.
    for task in snapshot.tasks() {
        let Some(constraint) = &task.spatial_constraint else {
            continue;
        };
        let SpatialTarget::Point(target) = constraint.target else {
            continue;
        };
        let glyph = task_glyph(snapshot, task.id);
        stamp_cell(&mut frame, target.cell(), glyph);
    }

    // Robots last: they sit on top of whatever they stand on.
    for state in snapshot.robot_states().values() {
        let digit = (state.robot_id.0 % 10).to_string();
        stamp_cell(&mut frame, state.position.cell(), &digit);
    }

    frame
}

fn stamp_cell(frame: &mut Frame, cell: Cell, glyph: &str) {
    frame.stamp(cell.x as i64, cell.y as i64, glyph);
}

fn zone_glyph(zone_type: ZoneType) -> &'static str {
    match zone_type {
        ZoneType::Inspection => "i",
        ZoneType::Maintenance => "m",
        ZoneType::Loading => "l",
        ZoneType::Restricted => "r",
        ZoneType::Charging => "c",
    }
}

fn task_glyph(snapshot: &Snapshot, task_id: TaskId) -> &'static str {
    match snapshot.task_states().get(&task_id).map(|s| s.status) {
        Some(TaskStatus::Unassigned) | None => "?",
        Some(TaskStatus::Assigned) | Some(TaskStatus::InProgress) => "*",
        Some(TaskStatus::Done) => "+",
        Some(TaskStatus::Failed) => "x",
    }
}
