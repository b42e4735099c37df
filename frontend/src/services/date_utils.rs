use shared::month_name;

/// Today's date as (year, month, day) from the browser clock
pub fn today() -> (u32, u32, u32) {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year();
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    (year, month, day)
}

/// Get current date in YYYY-MM-DD format
pub fn get_current_date() -> String {
    let (year, month, day) = today();
    format!("{:04}-{:02}-{:02}", year, month, day)
}

/// Format a YYYY-MM-DD date for display, e.g. "14 de Junio de 2025"
pub fn format_display_date(iso_date: &str) -> String {
    let parts: Vec<&str> = iso_date.trim().split('-').collect();
    if let [year, month, day] = parts.as_slice() {
        if let (Ok(y), Ok(m), Ok(d)) = (year.parse::<u32>(), month.parse::<u32>(), day.parse::<u32>()) {
            if (1..=12).contains(&m) {
                return format!("{} de {} de {}", d, month_name(m), y);
            }
        }
    }
    iso_date.to_string()
}

/// Amount formatted as pesos, e.g. "$45,200.00"
pub fn format_currency(amount: f64) -> String {
    let negative = amount < 0.0;
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = (cents / 100).to_string();

    let mut grouped = String::new();
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}${}.{:02}", if negative { "-" } else { "" }, grouped, cents % 100)
}
