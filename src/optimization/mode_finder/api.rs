//! Entry point: maximize a [`LogDensity`] with L-BFGS.
use crate::optimization::{
    errors::OptResult,
    mode_finder::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogDensity, MLEOptions},
    },
};

/// Find `argmax log p(θ)` starting from `theta0`.
///
/// `f.check(theta0)` runs first; the line search follows
/// `opts.line_searcher`.
///
/// # Errors
/// - Anything `f.check` rejects.
/// - Invalid solver tolerances.
/// - Solver failures, including errors raised by `f` mid-run.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use rust_bpc::optimization::errors::OptResult;
/// use rust_bpc::optimization::mode_finder::{LogDensity, MLEOptions, Theta, maximize};
///
/// struct Peak;
/// impl LogDensity for Peak {
///     fn value(&self, theta: &Theta) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _theta: &Theta) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Peak, array![0.4, -0.3], &MLEOptions::default())?;
/// println!("mode = {:?}", out.theta_hat);
/// # Ok::<(), rust_bpc::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogDensity>(f: &F, theta0: Theta, opts: &MLEOptions) -> OptResult<OptimOutcome> {
    f.check(&theta0)?;
    let problem = ArgMinAdapter::new(f);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            run_lbfgs(theta0, opts, problem, build_optimizer_more_thuente(opts)?)
        }
        LineSearcher::HagerZhang => {
            run_lbfgs(theta0, opts, problem, build_optimizer_hager_zhang(opts)?)
        }
    }
}
