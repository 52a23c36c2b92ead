pub struct FileSizeUtils;

impl FileSizeUtils {
    /// Formats a byte count the way the upload form shows it, e.g. `1.5 KB`.
    pub fn format_size(size: u64) -> String {
        const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
        if size == 0 {
            return "0 Bytes".to_string();
        }

        let mut size = size as f64;
        let mut unit_index = 0;

        while size >= 1024.0 && unit_index < UNITS.len() - 1 {
            size /= 1024.0;
            unit_index += 1;
        }

        let rounded = format!("{:.1}", size);
        let rounded = rounded.strip_suffix(".0").unwrap_or(&rounded);
        format!("{} {}", rounded, UNITS[unit_index])
    }
}
