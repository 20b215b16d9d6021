use prakriti_core::model::{Dosha, DoshaResult};

/// One row of the percentage bar chart on the results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoshaBarVm {
    pub label: &'static str,
    pub percent: u8,
    pub dominant: bool,
}

#[must_use]
pub fn map_result_bars(result: &DoshaResult) -> Vec<DoshaBarVm> {
    Dosha::ALL
        .iter()
        .map(|&dosha| DoshaBarVm {
            label: dosha.display_name(),
            percent: result.percentage(dosha),
            dominant: dosha == result.dominant,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bars_follow_dosha_order_and_mark_dominant() {
        let result = DoshaResult {
            vata: 20,
            pitta: 50,
            kapha: 30,
            dominant: Dosha::Pitta,
        };
        let bars = map_result_bars(&result);
        assert_eq!(bars.len(), 3);
        assert_eq!(bars[0].label, "Vata");
        assert_eq!(bars[1].percent, 50);
        assert!(bars[1].dominant);
        assert!(!bars[2].dominant);
    }
}
