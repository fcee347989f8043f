use ferrite_check::check::{sample_indices, CheckConfig, DifferenceScheme, GradientChecker};
use ferrite_check::{check_gradient, decode_one_hot, encode_one_hot};

/// Mean-squared error of a linear model `w · input` against fixed targets.
fn mse(w: &[f64], inputs: &[Vec<f64>], targets: &[f64]) -> f64 {
    let n = inputs.len() as f64;
    inputs.iter().zip(targets)
        .map(|(input, t)| {
            let pred: f64 = input.iter().zip(w).map(|(a, b)| a * b).sum();
            (pred - t).powi(2)
        })
        .sum::<f64>() / n
}

/// ∂MSE/∂w_j = 2/n · Σ (pred - t) · input_j
fn mse_grad(w: &[f64], inputs: &[Vec<f64>], targets: &[f64]) -> Vec<f64> {
    let n = inputs.len() as f64;
    let mut grad = vec![0.0; w.len()];
    for (input, t) in inputs.iter().zip(targets) {
        let pred: f64 = input.iter().zip(w).map(|(a, b)| a * b).sum();
        for (g, a) in grad.iter_mut().zip(input) {
            *g += 2.0 / n * (pred - t) * a;
        }
    }
    grad
}

fn main() {
    let inputs = vec![
        vec![1.0, 0.0, 2.0],
        vec![1.0, 1.0, -1.0],
        vec![0.5, 3.0, 0.0],
    ];
    let targets = vec![1.0, 0.0, 2.0];
    let w = vec![0.3, -0.2, 0.7];

    let loss = |w: &[f64]| mse(w, &inputs, &targets);
    let grad = |w: &[f64]| mse_grad(w, &inputs, &targets);

    println!("== correct backward pass");
    match check_gradient(loss, grad, &w, &[0, 1, 2]) {
        Ok(valid) => println!("valid: {valid}\n"),
        Err(e) => eprintln!("check failed to run: {e}"),
    }

    println!("== backward pass missing the 2/n factor");
    let sloppy = |w: &[f64]| {
        mse_grad(w, &inputs, &targets).into_iter().map(|g| g * inputs.len() as f64 / 2.0).collect::<Vec<f64>>()
    };
    match check_gradient(loss, sloppy, &w, &[0, 1, 2]) {
        Ok(valid) => println!("valid: {valid}\n"),
        Err(e) => eprintln!("check failed to run: {e}"),
    }

    println!("== central differences on a random subset");
    let checker = GradientChecker::new(CheckConfig::default().with_scheme(DifferenceScheme::Central));
    let indices = sample_indices(w.len(), 2, &mut rand::thread_rng());
    match checker.run(loss, grad, &w, &indices) {
        Ok(report) => println!("{report}\nmax difference: {:.2e}\n", report.max_abs_difference()),
        Err(e) => eprintln!("check failed to run: {e}"),
    }

    println!("== one-hot labels");
    let labels = [0, 2, 1];
    match encode_one_hot(&labels, 3) {
        Ok(encoded) => {
            for row in &encoded.data {
                println!("{:?}", row);
            }
            match decode_one_hot(&encoded) {
                Ok(decoded) => println!("decoded: {:?}", decoded),
                Err(e) => eprintln!("decoding failed: {e}"),
            }
        }
        Err(e) => eprintln!("encoding failed: {e}"),
    }
}
