use crate::trace::{
    TraceGroup,
    TraceSet,
};

pub trait RerunPlottable<T> {
    fn plot(
        &self,
        rec: &mut rerun::RecordingStream,
        entry_path: String,
        log_sequence: Option<i64>,
        required_extras: T,
    ) -> Result<(), Box<dyn std::error::Error>>;
}

/// Evenly spaced hues, one per group.
pub fn group_color(
    group_idx: usize,
    num_groups: usize,
) -> [u8; 3] {
    let hue = (group_idx as f32) / (num_groups.max(1) as f32) * 6.;
    let sector = hue.floor() as u32 % 6;
    let frac = hue - hue.floor();
    let rising = (frac * 255.) as u8;
    let falling = 255 - rising;
    match sector {
        0 => [255, rising, 0],
        1 => [falling, 255, 0],
        2 => [0, 255, rising],
        3 => [0, falling, 255],
        4 => [rising, 0, 255],
        _ => [255, 0, falling],
    }
}

impl RerunPlottable<&TraceSet> for [TraceGroup] {
    fn plot(
        &self,
        rec: &mut rerun::RecordingStream,
        entry_path: String,
        log_sequence: Option<i64>,
        required_extras: &TraceSet,
    ) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(seq) = log_sequence {
            rec.set_time_sequence("num_groups", seq);
        }

        for (group_idx, group) in self.iter().enumerate() {
            let [r, g, b] = group_color(group_idx, self.len());
            let strips = group
                .iter()
                .map(|id| {
                    rerun::components::LineStrip2D::from(
                        required_extras[*id]
                            .points()
                            .iter()
                            .map(|p| [p.x as f32, p.y as f32]),
                    )
                })
                .collect::<Vec<_>>();

            rec.log(
                format!("{}/group_{}", entry_path, group_idx),
                &rerun::LineStrips2D::new(strips)
                    .with_colors(std::iter::repeat(rerun::Color::from_rgb(r, g, b)).take(group.len())),
            )?;
        }
        Ok(())
    }
}

pub fn setup_recorder() -> Result<rerun::RecordingStream, Box<dyn std::error::Error>> {
    let rec = rerun::RecordingStreamBuilder::new("tracesplit").connect()?;
    rec.set_time_sequence("num_groups", 0);
    Ok(rec)
}
