//! Constrained parameter values and flat parameter names.
use ndarray::Array1;

/// Parameters of the Davidson model: coefficients `B` and tie parameter `nu`.
#[derive(Debug, Clone, PartialEq)]
pub struct DavidsonParams {
    pub b: Array1<f64>,
    pub nu: f64,
}

/// Parameters of the prediction model: coefficients `B`.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictParams {
    pub b: Array1<f64>,
}

/// Flat names of a variable with dims `dims`: `"nu"` for a scalar,
/// `"B.1"`, `"B.2"`, ... for a vector.
pub fn flat_names(name: &str, dims: &[usize]) -> Vec<String> {
    match dims {
        [] => vec![name.to_string()],
        [len] => (1..=*len).map(|i| format!("{name}.{i}")).collect(),
        _ => {
            // Column-major, first index fastest.
            let total: usize = dims.iter().product();
            (0..total)
                .map(|mut flat| {
                    let idx: Vec<String> = dims
                        .iter()
                        .map(|&d| {
                            let i = flat % d + 1;
                            flat /= d;
                            i.to_string()
                        })
                        .collect();
                    format!("{name}.{}", idx.join("."))
                })
                .collect()
        }
    }
}
