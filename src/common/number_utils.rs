use rust_decimal::{Decimal, RoundingStrategy};

// ---
// Helpers de arredondamento para exibição
// ---
// Meio ponto sempre para longe do zero (12.345 -> 12.35, -12.345 -> -12.35),
// o que mantém round(-x) == -round(x) nas comparações.

pub(crate) fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

pub(crate) fn round1(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// `part / whole * 100`, uma casa decimal. `whole` zero ou negativo vira 0.0.
pub(crate) fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    round1(part * Decimal::ONE_HUNDRED / whole)
}
