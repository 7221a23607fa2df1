/// Fraction of the page scrolled past, always within `[0, 1]`.
pub fn scroll_fraction(scroll_top: f64, document_height: f64, viewport_height: f64) -> f64 {
    let scrollable = document_height - viewport_height;
    let progress = if scrollable > 0.0 {
        scroll_top / scrollable
    } else {
        0.0
    };

    if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    }
}

pub fn indicator_transform(progress: f64) -> String {
    format!("scaleX({progress})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midway_scroll_is_proportional() {
        assert_eq!(scroll_fraction(500.0, 2_000.0, 1_000.0), 0.5);
        assert_eq!(indicator_transform(0.5), "scaleX(0.5)");
    }

    #[test]
    fn page_without_scroll_room_reports_zero() {
        assert_eq!(scroll_fraction(0.0, 800.0, 800.0), 0.0);
        assert_eq!(scroll_fraction(40.0, 600.0, 800.0), 0.0);
    }

    #[test]
    fn out_of_range_positions_are_clamped() {
        assert_eq!(scroll_fraction(-120.0, 2_000.0, 1_000.0), 0.0);
        assert_eq!(scroll_fraction(1_400.0, 2_000.0, 1_000.0), 1.0);
        assert_eq!(indicator_transform(1.0), "scaleX(1)");
    }

    #[test]
    fn non_finite_input_stays_in_range() {
        assert_eq!(scroll_fraction(f64::NAN, 2_000.0, 1_000.0), 0.0);
        assert_eq!(scroll_fraction(f64::INFINITY, 2_000.0, 1_000.0), 1.0);
        assert_eq!(scroll_fraction(10.0, f64::NAN, 1_000.0), 0.0);
    }
}
