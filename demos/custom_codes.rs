use coded_errors::{Code, Result, StructuredError, bail_code, chain, define_codes, definitions};

define_codes! {
    /// Payment declined by the issuer.
    PAYMENT_DECLINED = "PAYMENT_DECLINED",
    /// Card past its expiry date.
    CARD_EXPIRED = "CARD_EXPIRED",
}

fn charge(card: &str, amount: u64) -> Result<()> {
    match card {
        "expired" => bail_code!(CARD_EXPIRED, "card expired"),
        "declined" => bail_code!(PAYMENT_DECLINED, "declined charge of {} cents", amount),
        _ => Ok(()),
    }
}

fn checkout(card: &str) -> Result<()> {
    charge(card, 4200).map_err(|err| StructuredError::wrap(err, "checkout"))
}

fn main() {
    println!("--- Custom Codes Example ---\n");

    for card in ["valid", "declined", "expired"] {
        match checkout(card) {
            Ok(()) => println!("{card}: ok"),
            Err(err) => {
                let code = err.code();
                println!(
                    "{card}: {err} [{code}, predefined: {}]",
                    code.is_predefined()
                );
            }
        }
    }

    // Codes built at runtime compare by label.
    let dynamic = Code::new(String::from("PAYMENT_DECLINED"));
    let Err(err) = checkout("declined") else {
        return;
    };
    println!("\nruntime label matches: {}", chain::contains_code(&err, &dynamic));
    println!("catalog entry matches: {}", chain::contains_code(&err, &definitions::BAD_REQUEST));
}
