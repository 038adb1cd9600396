use crate::error::{ChartError, ChartResult};

/// Continuous domain-to-range mapping.
///
/// The domain may be descending (`start > end`), which is how the y axis maps
/// larger values towards the top of the drawing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    pub fn map(self, value: f64) -> ChartResult<f64> {
        if !value.is_finite() {
            return Err(ChartError::InvalidData("value must be finite".to_owned()));
        }

        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        Ok(self.range_start + normalized * (self.range_end - self.range_start))
    }
}

#[cfg(test)]
mod tests {
    use super::LinearScale;

    #[test]
    fn descending_domain_maps_max_to_range_start() {
        let scale = LinearScale::new((100.0, 0.0), (0.0, 500.0)).expect("scale");
        assert_eq!(scale.map(100.0).expect("map"), 0.0);
        assert_eq!(scale.map(0.0).expect("map"), 500.0);
        assert_eq!(scale.map(25.0).expect("map"), 375.0);
    }

    #[test]
    fn zero_width_domain_is_rejected() {
        assert!(LinearScale::new((1.0, 1.0), (0.0, 10.0)).is_err());
    }
}
