use chrono::TimeDelta;

pub trait FormatHMS {
    fn format_hms(&self) -> String;
}

impl FormatHMS for TimeDelta {
    fn format_hms(&self) -> String {
        let seconds = self.num_seconds();
        seconds.format_hms()
    }
}

impl FormatHMS for i64 {
    fn format_hms(&self) -> String {
        let abs = self.unsigned_abs();
        let h = abs / 3600;
        let m = (abs % 3600) / 60;
        let s = abs % 60;
        let sign = if *self < 0 { "-" } else { "" };
        format!("{sign}{h}:{m:02}:{s:02}")
    }
}
