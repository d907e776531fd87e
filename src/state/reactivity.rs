// ============================================================================
// REACTIVITY - Sistema de notificaciones/subscribers para reactividad
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Estado reactivo con sistema de notificaciones
pub struct ReactiveState<T> {
    value: RefCell<T>,
    subscribers: RefCell<Vec<Callback>>,
}

impl<T> ReactiveState<T> {
    /// Crear nuevo estado reactivo
    pub fn new(value: T) -> Self {
        Self {
            value: RefCell::new(value),
            subscribers: RefCell::new(Vec::new()),
        }
    }

    /// Leer el valor sin clonarlo
    pub fn with<R>(&self, reader: impl FnOnce(&T) -> R) -> R {
        reader(&self.value.borrow())
    }

    /// Establecer nuevo valor y notificar subscribers
    pub fn set(&self, new_value: T) {
        *self.value.borrow_mut() = new_value;
        self.notify();
    }

    /// Actualizar valor usando closure y notificar
    pub fn update<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        updater(&mut self.value.borrow_mut());
        self.notify();
    }

    /// Suscribirse a cambios
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    /// Notificar a todos los subscribers. El valor ya no está prestado, así
    /// que los callbacks pueden leerlo (o suscribir otros).
    fn notify(&self) {
        let callbacks: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}

impl<T: Clone> ReactiveState<T> {
    /// Obtener una copia del valor
    pub fn get(&self) -> T {
        self.value.borrow().clone()
    }
}

impl<T: Default> Default for ReactiveState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

/// Marca `is_loading` mientras vive; lo limpia al salir por cualquier camino
/// (éxito, error o future abandonado).
pub struct LoadingGuard<'a> {
    flag: &'a ReactiveState<bool>,
}

impl<'a> LoadingGuard<'a> {
    pub fn acquire(flag: &'a ReactiveState<bool>) -> Self {
        flag.set(true);
        Self { flag }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn subscribers_see_new_value() {
        let state = Rc::new(ReactiveState::new(1));
        let seen = Rc::new(Cell::new(0));

        {
            let state_ref = Rc::clone(&state);
            let seen = Rc::clone(&seen);
            state.subscribe(move || seen.set(state_ref.get()));
        }

        state.set(5);
        assert_eq!(seen.get(), 5);

        state.update(|v| *v += 1);
        assert_eq!(seen.get(), 6);
    }

    #[test]
    fn loading_guard_clears_on_drop() {
        let flag = ReactiveState::new(false);
        {
            let _guard = LoadingGuard::acquire(&flag);
            assert!(flag.get());
        }
        assert!(!flag.get());
    }
}
