// ============================================================================
// DEBOUNCE - evita disparar una búsqueda en cada tecla
// ============================================================================
// Cada input cancela la tarea pendiente y programa una nueva; sólo la tarea
// que completa su espera sin ser reemplazada actualiza el valor.
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use futures::future::{abortable, AbortHandle};

use crate::state::ReactiveState;
use crate::utils::runtime;

pub struct Debouncer<T> {
    delay_ms: u64,
    output: Rc<ReactiveState<T>>,
    pending: RefCell<Option<AbortHandle>>,
}

impl<T: Clone + 'static> Debouncer<T> {
    pub fn new(initial: T, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            output: Rc::new(ReactiveState::new(initial)),
            pending: RefCell::new(None),
        }
    }

    /// Valor debounced actual
    pub fn get(&self) -> T {
        self.output.get()
    }

    /// Estado reactivo de salida, para suscribirse
    pub fn output(&self) -> Rc<ReactiveState<T>> {
        Rc::clone(&self.output)
    }

    /// Registrar un nuevo valor de entrada
    pub fn input(&self, value: T) {
        self.cancel();

        let output = Rc::clone(&self.output);
        let delay_ms = self.delay_ms;
        let (task, handle) = abortable(async move {
            runtime::sleep(delay_ms).await;
            output.set(value);
        });

        *self.pending.borrow_mut() = Some(handle);
        runtime::spawn_local(async move {
            // Err(Aborted) = reemplazada por un input más nuevo
            let _ = task.await;
        });
    }

    /// Cancelar la tarea pendiente, si existe
    pub fn cancel(&self) {
        if let Some(handle) = self.pending.borrow_mut().take() {
            handle.abort();
        }
    }
}

impl<T> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(handle) = self.pending.get_mut().take() {
            handle.abort();
        }
    }
}
