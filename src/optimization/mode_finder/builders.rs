//! L-BFGS construction for the mode finder.
//!
//! Builders only choose the line search, the history length, and the
//! solver-side tolerances. The starting point and the iteration cap belong
//! to the executor and are applied in [`crate::optimization::mode_finder::run`].
use crate::optimization::{
    errors::OptResult,
    mode_finder::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};
use argmin::solver::quasinewton::LBFGS;

/// L-BFGS with Hager–Zhang line search.
pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LBFGS::new(HagerZhangLS::new(), mem), opts)
}

/// L-BFGS with More–Thuente line search.
pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    configure_lbfgs(LBFGS::new(MoreThuenteLS::new(), mem), opts)
}

/// Apply `tol_grad` / `tol_cost` when set; argmin's defaults apply otherwise.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(tol) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(tol)?;
    }
    if let Some(tol) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(tol)?;
    }
    Ok(solver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::optimization::mode_finder::traits::{LineSearcher, Tolerances};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Construction with both line searches, with and without explicit memory.
    // - Tolerance wiring through `configure_lbfgs`.
    //
    // Full solves are exercised through `maximize` and the model tests.
    // -------------------------------------------------------------------------

    fn opts(ls: LineSearcher, mem: Option<usize>) -> MLEOptions {
        let tols = Tolerances::new(Some(1e-6), Some(1e-9), Some(40)).unwrap();
        MLEOptions::new(tols, ls, false, mem).unwrap()
    }

    #[test]
    // Purpose
    // -------
    // Both builders accept default and explicit history lengths.
    //
    // Given
    // -----
    // - Valid options with `lbfgs_mem` of `None` and `Some(11)`.
    //
    // Expect
    // ------
    // - All four builds succeed.
    fn builders_accept_default_and_explicit_memory() {
        for mem in [None, Some(11)] {
            assert!(build_optimizer_hager_zhang(&opts(LineSearcher::HagerZhang, mem)).is_ok());
            assert!(build_optimizer_more_thuente(&opts(LineSearcher::MoreThuente, mem)).is_ok());
        }
    }

    #[test]
    // Purpose
    // -------
    // Missing tolerances leave the solver untouched.
    //
    // Given
    // -----
    // - Options with only `max_iter` set.
    //
    // Expect
    // ------
    // - `configure_lbfgs` succeeds.
    fn configure_without_tolerances() {
        let tols = Tolerances::new(None, None, Some(5)).unwrap();
        let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, None).unwrap();
        let raw = LBFGS::new(MoreThuenteLS::new(), DEFAULT_LBFGS_MEM);
        assert!(configure_lbfgs(raw, &opts).is_ok());
    }
}
