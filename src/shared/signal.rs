//! Explizite Beobachter-Listen für Invalidierungen und beobachtbare Werte.
//!
//! Abonnenten werden über eine `SubscriptionId` wieder abgemeldet; es gibt
//! keine schwachen Referenzen.

use std::fmt;

/// Handle eines Abonnements, wird für `unsubscribe` benötigt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Synchrones Signal ohne Nutzdaten.
#[derive(Default)]
pub struct Signal {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut()>)>,
}

impl Signal {
    /// Erstellt ein Signal ohne Abonnenten.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registriert einen Callback.
    pub fn subscribe(&mut self, callback: impl FnMut() + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Meldet einen Callback ab. Gibt `false` zurück wenn die ID unbekannt ist.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() < before
    }

    /// Ruft alle Abonnenten in Registrierungsreihenfolge auf.
    pub fn emit(&mut self) {
        for (_, callback) in &mut self.subscribers {
            callback();
        }
    }

    /// Anzahl registrierter Abonnenten.
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

/// Beobachtbarer Wert; Abonnenten werden nur bei tatsächlicher Änderung benachrichtigt.
pub struct Bindable<T> {
    value: T,
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&T)>)>,
}

impl<T: PartialEq> Bindable<T> {
    /// Erstellt einen Bindable mit Startwert.
    pub fn new(value: T) -> Self {
        Self {
            value,
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Aktueller Wert.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Setzt den Wert und benachrichtigt bei Änderung. Gibt `true` bei Änderung zurück.
    pub fn set(&mut self, value: T) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        for (_, callback) in &mut self.subscribers {
            callback(&self.value);
        }
        true
    }

    /// Registriert einen Callback für Wertänderungen.
    pub fn subscribe(&mut self, callback: impl FnMut(&T) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(callback)));
        id
    }

    /// Meldet einen Callback ab.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() < before
    }
}

impl<T: fmt::Debug> fmt::Debug for Bindable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bindable")
            .field("value", &self.value)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn signal_calls_subscribers_until_unsubscribed() {
        let hits = Rc::new(Cell::new(0));
        let mut signal = Signal::new();

        let counter = hits.clone();
        let id = signal.subscribe(move || counter.set(counter.get() + 1));

        signal.emit();
        signal.emit();
        assert_eq!(hits.get(), 2);

        assert!(signal.unsubscribe(id));
        assert!(!signal.unsubscribe(id));
        signal.emit();
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn bindable_notifies_only_on_change() {
        let seen = Rc::new(Cell::new(0));
        let mut flag = Bindable::new(false);

        let counter = seen.clone();
        flag.subscribe(move |_| counter.set(counter.get() + 1));

        assert!(!flag.set(false));
        assert!(flag.set(true));
        assert!(!flag.set(true));
        assert!(flag.set(false));
        assert_eq!(seen.get(), 2);
        assert!(!*flag.value());
    }
}
