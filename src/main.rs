// Small smoke run of both helpers; the library lives in src/lib.rs.
// For a longer walkthrough:
//   cargo run --example quadratic
use std::error::Error;

use ferrite_check::{check_gradient, encode_one_hot};

fn main() -> Result<(), Box<dyn Error>> {
    println!("ferrite-check: gradient checking and label encoding helpers.");

    let loss = |x: &[f64]| x.iter().map(|v| v * v).sum::<f64>();
    let grad = |x: &[f64]| x.iter().map(|v| 2.0 * v).collect::<Vec<f64>>();
    let x = vec![0.5, -1.5, 2.0];
    check_gradient(loss, grad, &x, &[0, 1, 2])?;

    let encoded = encode_one_hot(&[0, 2, 1], 3)?;
    println!("one-hot of [0, 2, 1]:");
    for row in &encoded.data {
        println!("  {:?}", row);
    }
    Ok(())
}
