// ============================================================================
// RUNTIME - timers y tareas locales (un solo hilo)
// ============================================================================
// En el navegador el event loop corre las tareas solo. En nativo se encolan en
// un LocalSet propio del hilo y avanzan mientras el host esté dentro de
// `run_until`.
// ============================================================================

use std::future::Future;

/// El plazo de `timeout` venció antes que el future
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Elapsed;

#[cfg(target_arch = "wasm32")]
fn clamp_ms(ms: u64) -> u32 {
    ms.min(u32::MAX as u64) as u32
}

/// Espera `ms` milisegundos
#[cfg(target_arch = "wasm32")]
pub async fn sleep(ms: u64) {
    gloo_timers::future::TimeoutFuture::new(clamp_ms(ms)).await;
}

/// Espera `ms` milisegundos (requiere un runtime tokio activo)
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(ms: u64) {
    tokio::time::sleep(std::time::Duration::from_millis(ms)).await;
}

/// Corre `future` con un plazo de `ms` milisegundos
#[cfg(target_arch = "wasm32")]
pub async fn timeout<F: Future>(ms: u64, future: F) -> Result<F::Output, Elapsed> {
    use futures::future::{select, Either};

    let timer = gloo_timers::future::TimeoutFuture::new(clamp_ms(ms));
    futures::pin_mut!(future);
    futures::pin_mut!(timer);
    match select(future, timer).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => Err(Elapsed),
    }
}

/// Corre `future` con un plazo de `ms` milisegundos
#[cfg(not(target_arch = "wasm32"))]
pub async fn timeout<F: Future>(ms: u64, future: F) -> Result<F::Output, Elapsed> {
    tokio::time::timeout(std::time::Duration::from_millis(ms), future)
        .await
        .map_err(|_| Elapsed)
}

/// Lanza una tarea en el hilo actual
#[cfg(target_arch = "wasm32")]
pub fn spawn_local<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Maneja las tareas de fondo hasta que `future` termine (no-op en el
/// navegador, donde el event loop ya las corre)
#[cfg(target_arch = "wasm32")]
pub async fn run_until<F: Future>(future: F) -> F::Output {
    future.await
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::{run_until, spawn_local};

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::future::Future;
    use std::rc::Rc;

    use tokio::task::LocalSet;

    thread_local! {
        static TASKS: Rc<LocalSet> = Rc::new(LocalSet::new());
    }

    /// Encola una tarea en el LocalSet del hilo. Nunca entra en pánico: si
    /// nadie está dentro de `run_until`, la tarea espera a la próxima vez.
    pub fn spawn_local<F>(future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        TASKS.with(|tasks| {
            tasks.spawn_local(future);
        });
    }

    /// Maneja las tareas encoladas hasta que `future` termine. Requiere un
    /// runtime tokio con timers.
    pub async fn run_until<F: Future>(future: F) -> F::Output {
        let tasks = TASKS.with(Rc::clone);
        tasks.run_until(future).await
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[tokio::test]
    async fn spawn_outside_run_until_is_deferred() {
        let ran = Rc::new(Cell::new(false));
        {
            let ran = Rc::clone(&ran);
            spawn_local(async move { ran.set(true) });
        }
        assert!(!ran.get());

        run_until(tokio::task::yield_now()).await;
        assert!(ran.get());
    }

    #[tokio::test(start_paused = true)]
    async fn timeout_elapses_on_stalled_future() {
        let stalled = futures::future::pending::<()>();
        assert_eq!(timeout(100, stalled).await, Err(Elapsed));
        assert_eq!(timeout(100, async { 7 }).await, Ok(7));
    }
}
