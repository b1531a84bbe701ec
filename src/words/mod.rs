//! French amount-in-words, as printed under the totals of a facture:
//! "Arrêté la présente facture à la somme de : Trois mille cinq cents dirhams".

mod amount;
mod french;

pub use amount::{
    amount_to_words, amount_to_words_or_sentinel, Amount, AmountInput, INVALID_NUMBER,
    MAX_INTEGER_PART,
};
pub use french::number_to_french_words;
