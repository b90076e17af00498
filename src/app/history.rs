use super::commands::Command;

/// Ein aufgezeichneter Command mit seinem Inversen.
#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    /// Der ausgeführte (ggf. gemergte) Command
    pub command: Command,
    /// Inverses zum Zeitpunkt der Aufzeichnung; `None` wenn keines existiert
    pub reverse: Option<Command>,
}

/// Geordnete Liste von Einträgen, die gemeinsam rückgängig gemacht werden.
pub type Transaction = Vec<HistoryEntry>;

/// Undo/Redo-Stacks aus Transaktionen plus offener Transaktions-Puffer.
///
/// `max_depth == 0` bedeutet unbegrenzt; sonst wird beim Überlauf die älteste
/// Transaktion verworfen.
#[derive(Debug, Default)]
pub struct EditHistory {
    transaction: Transaction,
    undo_stack: Vec<Transaction>,
    redo_stack: Vec<Transaction>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        Self {
            transaction: Vec::new(),
            undo_stack: Vec::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth,
        }
    }

    /// Offene Transaktion (noch nicht committed).
    pub fn pending(&self) -> &[HistoryEntry] {
        &self.transaction
    }

    /// Offene Transaktion zum Aufzeichnen und Mergen.
    pub fn pending_mut(&mut self) -> &mut Transaction {
        &mut self.transaction
    }

    /// `true` solange Einträge auf ein `commit` warten.
    pub fn has_pending(&self) -> bool {
        !self.transaction.is_empty()
    }

    /// Schiebt die offene Transaktion auf den Undo-Stack und leert den Redo-Stack.
    ///
    /// Gibt `false` zurück (und ändert nichts), wenn der Puffer leer ist.
    pub fn commit(&mut self) -> bool {
        if self.transaction.is_empty() {
            return false;
        }
        let transaction = std::mem::take(&mut self.transaction);
        Self::push_bounded(&mut self.undo_stack, transaction, self.max_depth);
        self.redo_stack.clear();
        true
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Anzahl der Transaktionen auf dem Undo-Stack.
    pub fn undo_len(&self) -> usize {
        self.undo_stack.len()
    }

    /// Anzahl der Transaktionen auf dem Redo-Stack.
    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }

    /// Oberste Undo-Transaktion entnehmen.
    pub fn pop_undo(&mut self) -> Option<Transaction> {
        self.undo_stack.pop()
    }

    /// Oberste Redo-Transaktion entnehmen.
    pub fn pop_redo(&mut self) -> Option<Transaction> {
        self.redo_stack.pop()
    }

    /// Transaktion auf den Undo-Stack legen, ohne den Redo-Stack anzufassen.
    pub fn push_undo(&mut self, transaction: Transaction) {
        Self::push_bounded(&mut self.undo_stack, transaction, self.max_depth);
    }

    /// Transaktion auf den Redo-Stack legen.
    pub fn push_redo(&mut self, transaction: Transaction) {
        Self::push_bounded(&mut self.redo_stack, transaction, self.max_depth);
    }

    fn push_bounded(stack: &mut Vec<Transaction>, transaction: Transaction, max_depth: usize) {
        if max_depth > 0 && stack.len() >= max_depth {
            stack.remove(0);
        }
        stack.push(transaction);
    }
}
