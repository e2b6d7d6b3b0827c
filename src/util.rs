/// Race a future against a `CancellationToken`.
///
/// The last argument selects what a cancellation turns into:
/// `Option` => `None`, `Result` => `Err(anyhow!("cancelled"))`, `()` => `true` (and `false` if the future won).
#[macro_export]
macro_rules! cancellable {
    ($function:expr, $cancel_token:expr, Option) => {
        tokio::select! {
            option = $function => option,
            _ = $cancel_token.cancelled() => None
        }
    };
    ($function:expr, $cancel_token:expr, Result) => {
        tokio::select! {
            result = $function => result.map_err(|e| anyhow::anyhow!("{e}")),
            _ = $cancel_token.cancelled() => Err(anyhow::anyhow!("cancelled"))
        }
    };
    ($function:expr, $cancel_token:expr, ()) => {
        tokio::select! {
            _ = $function => false,
            _ = $cancel_token.cancelled() => true
        }
    };
}
