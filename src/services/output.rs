use crate::domain::models::{JsonErr, JsonOut};
use crate::mass::AdjustmentError;
use serde::Serialize;

pub fn print_one<T: Serialize>(
    json: bool,
    data: T,
    render: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        println!("{}", render(&data));
    }
    Ok(())
}

pub fn print_error(error: &AdjustmentError) -> anyhow::Result<()> {
    println!(
        "{}",
        serde_json::to_string_pretty(&JsonErr {
            ok: false,
            error,
            message: error.to_string(),
        })?
    );
    Ok(())
}
