use std::path::Path;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use pounce_core::{PounceError, Result};

use crate::config::PlatformConfig;
use crate::enemy::EnemyKind;
use crate::platform::{Platform, SemiSolidPlatform};

const HEADER_FIELDS: usize = 5;
const ENEMY_FIELDS: usize = 3;
const STATIC_PLATFORM_FIELDS: usize = 7;
const MOVING_PLATFORM_FIELDS: usize = 9;
/// Largest magnitude accepted for any position or size, so box edges and
/// spike rows stay well inside `i32`.
pub const MAX_COORDINATE: i32 = 1_000_000;

/// Platform type codes used by level files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlatformKind {
    Solid,
    /// `size.x` is the tooth count and `size.y` the tooth height.
    Spikes,
    SemiSolid,
}

impl PlatformKind {
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Solid),
            1 => Some(Self::Spikes),
            2 => Some(Self::SemiSolid),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub kind: EnemyKind,
    pub pos: IVec2,
}

/// One platform line.
///
/// Static platforms are placed by top-left corner. Moving platforms give two
/// waypoint centers and start at `pos`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformSpec {
    /// 1-based line the platform came from.
    pub line: usize,
    pub kind: PlatformKind,
    pub size: IVec2,
    pub orientation: i32,
    pub pos: IVec2,
    pub end: Option<IVec2>,
}

/// Parsed level file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Level {
    pub respawn: IVec2,
    /// Carried through untouched for the driver.
    pub objective: i32,
    pub enemies: Vec<EnemySpawn>,
    pub platforms: Vec<PlatformSpec>,
}

impl Level {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let level = Self::parse(&text)?;
        tracing::info!(
            path = %path.display(),
            enemies = level.enemies.len(),
            platforms = level.platforms.len(),
            "level loaded"
        );
        Ok(level)
    }

    /// Parse level text. Blank lines and `#` comments are skipped; every
    /// other line must match the header, enemy or platform layout.
    pub fn parse(text: &str) -> Result<Self> {
        let mut lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'));
        let end_line = text.lines().count() + 1;

        let (line_no, header) = lines
            .next()
            .ok_or_else(|| PounceError::level_format(end_line, "missing header"))?;
        let header = Fields::split(line_no, header, &[HEADER_FIELDS])?;
        let respawn = IVec2::new(header.coord(0, "respawn x")?, header.coord(1, "respawn y")?);
        let objective = header.int(2, "objective")?;
        let enemy_count = header.count(3, "enemy count")?;
        let platform_count = header.count(4, "platform count")?;

        let mut enemies = Vec::with_capacity(enemy_count);
        for n in 0..enemy_count {
            let (line_no, line) = lines.next().ok_or_else(|| {
                PounceError::level_format(
                    end_line,
                    format!("expected {enemy_count} enemy lines, found {n}"),
                )
            })?;
            enemies.push(parse_enemy(line_no, line)?);
        }

        let mut platforms = Vec::with_capacity(platform_count);
        for n in 0..platform_count {
            let (line_no, line) = lines.next().ok_or_else(|| {
                PounceError::level_format(
                    end_line,
                    format!("expected {platform_count} platform lines, found {n}"),
                )
            })?;
            platforms.push(parse_platform(line_no, line)?);
        }

        if let Some((line_no, _)) = lines.next() {
            return Err(PounceError::level_format(line_no, "unexpected extra line"));
        }

        Ok(Self {
            respawn,
            objective,
            enemies,
            platforms,
        })
    }

    /// Construct the level's platforms in file order.
    pub fn build(&self, config: &PlatformConfig) -> Result<(Vec<Platform>, Vec<SemiSolidPlatform>)> {
        let mut platforms = Vec::new();
        let mut semisolids = Vec::new();

        for spec in &self.platforms {
            match spec.kind {
                PlatformKind::SemiSolid => {
                    semisolids.push(SemiSolidPlatform::new(spec.pos, spec.size));
                },
                PlatformKind::Solid | PlatformKind::Spikes => {
                    let top_left = if spec.end.is_some() { IVec2::ZERO } else { spec.pos };
                    let platform = match spec.kind {
                        PlatformKind::Spikes => {
                            check_spike_row(spec, config.spike_tooth_width)?;
                            Platform::spikes(
                                top_left,
                                spec.size.x,
                                spec.size.y,
                                config.spike_tooth_width,
                                spec.orientation,
                            )?
                        },
                        _ => Platform::solid(top_left, spec.size),
                    };
                    platforms.push(match spec.end {
                        Some(end) => platform.with_route(spec.pos, end, config.dwell_ms),
                        None => platform,
                    });
                },
            }
        }

        Ok((platforms, semisolids))
    }
}

fn parse_enemy(line_no: usize, line: &str) -> Result<EnemySpawn> {
    let fields = Fields::split(line_no, line, &[ENEMY_FIELDS])?;
    let code = fields.int(0, "enemy code")?;
    let kind = EnemyKind::from_code(code).ok_or_else(|| {
        PounceError::level_format(line_no, format!("unknown enemy code {code}"))
    })?;
    Ok(EnemySpawn {
        kind,
        pos: IVec2::new(fields.coord(1, "enemy x")?, fields.coord(2, "enemy y")?),
    })
}

fn parse_platform(line_no: usize, line: &str) -> Result<PlatformSpec> {
    let fields = Fields::split(
        line_no,
        line,
        &[STATIC_PLATFORM_FIELDS, MOVING_PLATFORM_FIELDS],
    )?;
    let code = fields.int(0, "platform code")?;
    let kind = PlatformKind::from_code(code).ok_or_else(|| {
        PounceError::level_format(line_no, format!("unknown platform code {code}"))
    })?;

    let moving = match fields.int(1, "moving flag")? {
        0 => false,
        1 => true,
        other => {
            return Err(PounceError::level_format(
                line_no,
                format!("moving flag must be 0 or 1, got {other}"),
            ));
        },
    };
    let expected = if moving { MOVING_PLATFORM_FIELDS } else { STATIC_PLATFORM_FIELDS };
    if fields.len() != expected {
        return Err(PounceError::level_format(
            line_no,
            format!("expected {expected} fields, found {}", fields.len()),
        ));
    }
    if moving && kind == PlatformKind::SemiSolid {
        return Err(PounceError::level_format(line_no, "semi-solid platforms cannot move"));
    }

    let size = IVec2::new(fields.coord(2, "width")?, fields.coord(3, "height")?);
    if size.x <= 0 || size.y <= 0 {
        return Err(PounceError::level_format(
            line_no,
            format!("size must be positive, got {}x{}", size.x, size.y),
        ));
    }

    let end = if moving {
        Some(IVec2::new(fields.coord(7, "end x")?, fields.coord(8, "end y")?))
    } else {
        None
    };

    Ok(PlatformSpec {
        line: line_no,
        kind,
        size,
        orientation: fields.int(4, "orientation")?,
        pos: IVec2::new(fields.coord(5, "x")?, fields.coord(6, "y")?),
        end,
    })
}

/// A spike row's base length must stay within [`MAX_COORDINATE`].
fn check_spike_row(spec: &PlatformSpec, tooth_width: i32) -> Result<()> {
    spec.size
        .x
        .checked_mul(tooth_width)
        .filter(|length| (-MAX_COORDINATE..=MAX_COORDINATE).contains(length))
        .map(|_| ())
        .ok_or_else(|| {
            PounceError::level_format(
                spec.line,
                format!(
                    "{} teeth of width {tooth_width} exceed {MAX_COORDINATE} pixels",
                    spec.size.x
                ),
            )
        })
}

/// Whitespace-separated fields of one line.
struct Fields<'a> {
    line_no: usize,
    parts: Vec<&'a str>,
}

impl<'a> Fields<'a> {
    fn split(line_no: usize, line: &'a str, allowed_lens: &[usize]) -> Result<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if !allowed_lens.contains(&parts.len()) {
            let expected = allowed_lens
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(" or ");
            return Err(PounceError::level_format(
                line_no,
                format!("expected {expected} fields, found {}", parts.len()),
            ));
        }
        Ok(Self { line_no, parts })
    }

    fn len(&self) -> usize {
        self.parts.len()
    }

    fn int(&self, index: usize, name: &str) -> Result<i32> {
        let raw = self.parts.get(index).copied().unwrap_or_default();
        raw.parse().map_err(|_| {
            PounceError::level_format(self.line_no, format!("{name} is not an integer: {raw:?}"))
        })
    }

    /// Integer within `-MAX_COORDINATE..=MAX_COORDINATE`.
    fn coord(&self, index: usize, name: &str) -> Result<i32> {
        let value = self.int(index, name)?;
        if !(-MAX_COORDINATE..=MAX_COORDINATE).contains(&value) {
            return Err(PounceError::level_format(
                self.line_no,
                format!("{name} {value} is outside -{MAX_COORDINATE}..={MAX_COORDINATE}"),
            ));
        }
        Ok(value)
    }

    fn count(&self, index: usize, name: &str) -> Result<usize> {
        let raw = self.parts.get(index).copied().unwrap_or_default();
        raw.parse().map_err(|_| {
            PounceError::level_format(
                self.line_no,
                format!("{name} is not a non-negative integer: {raw:?}"),
            )
        })
    }
}
