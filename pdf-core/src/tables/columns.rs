use super::error::TableError;
use super::ColumnWidth;

/// Resolves mixed percent/point column widths into absolute points summing
/// to `table_width - (left_border_width + right_border_width) / 2`.
///
/// Percent columns are resolved first, directly against `table_width`; the
/// point columns then divide up whatever width remains, proportionally to
/// their own point values. A final uniform scale brings the total exactly
/// in line with the drawable interior (the border-reserved half-widths are
/// not part of any column).
pub fn resolve_column_widths(
    table_width: f64,
    widths: &[ColumnWidth],
    left_border_width: f64,
    right_border_width: f64,
) -> Result<Vec<f64>, TableError> {
    let percent_sum: f64 = widths
        .iter()
        .filter_map(|w| match w {
            ColumnWidth::Percent(p) => Some(table_width * p / 100.0),
            ColumnWidth::Point(_) => None,
        })
        .sum();

    let free_width = (table_width - percent_sum).max(0.0);
    let total_points: f64 = widths
        .iter()
        .filter_map(|w| match w {
            ColumnWidth::Point(q) => Some(*q),
            ColumnWidth::Percent(_) => None,
        })
        .sum();

    let mut resolved: Vec<f64> = widths
        .iter()
        .map(|w| match w {
            ColumnWidth::Percent(p) => table_width * p / 100.0,
            ColumnWidth::Point(q) => {
                if total_points > 0.0 {
                    free_width * q / total_points
                } else {
                    0.0
                }
            }
        })
        .collect();

    let border_halves = (left_border_width + right_border_width) / 2.0;
    let target = table_width - border_halves;
    let sum: f64 = resolved.iter().sum();
    if sum <= 0.0 {
        return Err(TableError::ZeroColumnWidth);
    }
    let factor = target / sum;
    for w in &mut resolved {
        *w *= factor;
    }
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_and_point_mix() {
        // S5: columns [50%, 10pt, 20pt], tableWidth=200
        let widths = [ColumnWidth::Percent(50.0), ColumnWidth::Point(10.0), ColumnWidth::Point(20.0)];
        let resolved = resolve_column_widths(200.0, &widths, 0.0, 0.0).unwrap();
        assert!((resolved[0] - 100.0).abs() < 1e-6);
        assert!((resolved[1] - 33.333).abs() < 1e-2);
        assert!((resolved[2] - 66.667).abs() < 1e-2);
        let total: f64 = resolved.iter().sum();
        assert!((total - 200.0).abs() < 1e-6);
    }

    #[test]
    fn uniform_thirds() {
        let widths = [
            ColumnWidth::Percent(33.0),
            ColumnWidth::Percent(33.0),
            ColumnWidth::Percent(34.0),
        ];
        let resolved = resolve_column_widths(100.0, &widths, 1.0, 1.0).unwrap();
        let total: f64 = resolved.iter().sum();
        assert!((total - 99.0).abs() < 1e-6);
    }

    #[test]
    fn zero_total_is_an_error() {
        let widths = [ColumnWidth::Point(0.0)];
        assert_eq!(
            resolve_column_widths(100.0, &widths, 0.0, 0.0),
            Err(TableError::ZeroColumnWidth),
        );
    }
}
