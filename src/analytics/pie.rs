use rust_decimal::Decimal;

use crate::format::format_amount;

/// Slices below this share of the pie are moved to the side legend.
pub(crate) const SMALL_SLICE_PERCENT: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Slice {
    pub(crate) label: String,
    pub(crate) value: Decimal,
    /// Share of the whole pie, 0..=100.
    pub(crate) percentage: Decimal,
}

impl Slice {
    /// Large enough to carry its own label on the pie.
    pub(crate) fn is_labeled(&self) -> bool {
        self.percentage >= SMALL_SLICE_PERCENT
    }

    pub(crate) fn percent_label(&self) -> String {
        format!("{:.1}%", self.percentage)
    }

    /// `Label (3.2%) ($120)`
    pub(crate) fn legend_line(&self) -> String {
        format!(
            "{} ({}) ({})",
            self.label,
            self.percent_label(),
            format_amount(self.value)
        )
    }
}

/// Heading for the small-slice legend, e.g. `Categories < 5%`.
pub(crate) fn small_legend_title() -> String {
    format!("Categories < {SMALL_SLICE_PERCENT}%")
}

/// A pie split into directly labelled slices and a small-slice legend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PieBreakdown {
    pub(crate) total: Decimal,
    /// Every slice, in input order.
    pub(crate) slices: Vec<Slice>,
    /// Slices under [`SMALL_SLICE_PERCENT`], smallest first.
    pub(crate) small_legend: Vec<Slice>,
}

impl PieBreakdown {
    /// `None` when there is nothing to draw.
    pub(crate) fn from_values(values: &[(String, Decimal)]) -> Option<Self> {
        let total: Decimal = values.iter().map(|(_, v)| *v).sum();
        if values.is_empty() || total <= Decimal::ZERO {
            return None;
        }

        let slices: Vec<Slice> = values
            .iter()
            .map(|(label, value)| Slice {
                label: label.clone(),
                value: *value,
                percentage: *value * Decimal::ONE_HUNDRED / total,
            })
            .collect();

        let mut small_legend: Vec<Slice> =
            slices.iter().filter(|s| !s.is_labeled()).cloned().collect();
        small_legend.sort_by(|a, b| {
            a.percentage
                .cmp(&b.percentage)
                .then_with(|| a.label.cmp(&b.label))
        });

        Some(Self {
            total,
            slices,
            small_legend,
        })
    }

    pub(crate) fn labeled(&self) -> impl Iterator<Item = &Slice> {
        self.slices.iter().filter(|s| s.is_labeled())
    }
}
