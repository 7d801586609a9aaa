use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::ui::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatMapDatum {
    pub date: NaiveDate,
    pub count: u32,
}

impl HeatMapDatum {
    pub fn new(date: NaiveDate, count: u32) -> Self {
        Self { date, count }
    }

    /// Cell intensity in `[0, 1]`, three activities saturate a cell.
    pub fn intensity(&self) -> f32 {
        (self.count as f32 / 3.0).min(1.0)
    }

    pub fn cell_color(&self) -> Color {
        let intensity = self.intensity();
        if intensity == 0.0 {
            Color::SURFACE
        } else {
            Color::PRIMARY.with_alpha(intensity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn datum(count: u32) -> HeatMapDatum {
        HeatMapDatum::new(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(), count)
    }

    #[test]
    fn empty_day_is_surface() {
        assert_eq!(datum(0).intensity(), 0.0);
        assert_eq!(datum(0).cell_color(), Color::SURFACE);
    }

    #[test]
    fn intensity_grows_then_caps() {
        assert!(datum(1).intensity() > 0.3 && datum(1).intensity() < 0.34);
        assert!(datum(2).intensity() > datum(1).intensity());
        assert_eq!(datum(3).intensity(), 1.0);
        assert_eq!(datum(9).intensity(), 1.0);
    }

    #[test]
    fn busy_day_uses_primary() {
        let color = datum(3).cell_color();
        assert_eq!(color, Color::PRIMARY);
        assert_eq!(datum(1).cell_color().alpha(), 85);
    }
}
