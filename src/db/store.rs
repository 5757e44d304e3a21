// src/db/store.rs

use chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

use crate::common::error::AppError;

/// Tudo que é guardado num `EntityStore`.
pub trait Entity: Clone {
    /// Nome legível usado em erros e logs.
    const KIND: &'static str;

    fn id(&self) -> Uuid;
}

/// Entidades criadas a partir de um draft (payload antes de id/timestamp).
pub trait Creatable: Entity {
    type Draft: Validate;

    fn from_draft(id: Uuid, now: DateTime<Utc>, draft: Self::Draft) -> Self;
}

/// Entidades que aceitam patch parcial (só os campos presentes mudam).
pub trait Patchable: Entity {
    type Patch: Validate;

    fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>);
}

/// Coleção em memória, na ordem de inserção.
#[derive(Debug, Clone)]
pub struct EntityStore<T> {
    items: Vec<T>,
}

impl<T> Default for EntityStore<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Entity> EntityStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.items.iter().any(|e| e.id() == id)
    }

    pub fn get(&self, id: Uuid) -> Option<&T> {
        self.items.iter().find(|e| e.id() == id)
    }

    /// Igual a `get`, mas com `NotFound` quando não existe.
    pub fn find(&self, id: Uuid) -> Result<&T, AppError> {
        self.get(id).ok_or_else(|| AppError::not_found(T::KIND, id))
    }

    pub(crate) fn get_mut(&mut self, id: Uuid) -> Result<&mut T, AppError> {
        self.items
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or_else(|| AppError::not_found(T::KIND, id))
    }

    pub fn filter<P>(&self, predicate: P) -> Vec<&T>
    where
        P: Fn(&T) -> bool,
    {
        self.items.iter().filter(|e| predicate(*e)).collect()
    }

    /// Insere uma entidade já montada (seed).
    pub fn insert(&mut self, entity: T) -> T {
        self.items.push(entity.clone());
        entity
    }

    pub fn delete(&mut self, id: Uuid) -> Result<T, AppError> {
        let pos = self
            .items
            .iter()
            .position(|e| e.id() == id)
            .ok_or_else(|| AppError::not_found(T::KIND, id))?;
        Ok(self.items.remove(pos))
    }

    /// Novo id v4, sorteado de novo no caso (improvável) de colisão.
    pub(crate) fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if !self.contains(id) {
                return id;
            }
        }
    }
}

impl<T: Creatable> EntityStore<T> {
    pub fn create(&mut self, draft: T::Draft) -> Result<T, AppError> {
        draft.validate()?;
        let entity = T::from_draft(self.fresh_id(), Utc::now(), draft);
        Ok(self.insert(entity))
    }
}

impl<T: Patchable> EntityStore<T> {
    pub fn update(&mut self, id: Uuid, patch: T::Patch) -> Result<T, AppError> {
        let entity = self.get_mut(id)?;
        patch.validate()?;
        entity.apply_patch(patch, Utc::now());
        Ok(entity.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: Uuid,
        title: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    }

    #[derive(Debug, Validate)]
    struct NoteDraft {
        #[validate(length(min = 1))]
        title: String,
    }

    #[derive(Debug, Validate)]
    struct NotePatch {
        #[validate(length(min = 1))]
        title: Option<String>,
    }

    impl Entity for Note {
        const KIND: &'static str = "Nota";
        fn id(&self) -> Uuid {
            self.id
        }
    }

    impl Creatable for Note {
        type Draft = NoteDraft;
        fn from_draft(id: Uuid, now: DateTime<Utc>, draft: NoteDraft) -> Self {
            Note { id, title: draft.title, created_at: now, updated_at: now }
        }
    }

    impl Patchable for Note {
        type Patch = NotePatch;
        fn apply_patch(&mut self, patch: NotePatch, now: DateTime<Utc>) {
            if let Some(title) = patch.title {
                self.title = title;
            }
            self.updated_at = now;
        }
    }

    fn store_with(titles: &[&str]) -> EntityStore<Note> {
        let mut store = EntityStore::new();
        for t in titles {
            store.create(NoteDraft { title: t.to_string() }).unwrap();
        }
        store
    }

    #[test]
    fn create_appends_one_entity_with_fresh_id() {
        let mut store = store_with(&["a", "b"]);
        let before: Vec<Uuid> = store.all().iter().map(|n| n.id).collect();

        let created = store.create(NoteDraft { title: "c".into() }).unwrap();

        assert_eq!(store.len(), 3);
        assert!(!before.contains(&created.id));
        let matching = store.filter(|n| n.id == created.id);
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].title, "c");
        assert_eq!(store.all().last().unwrap().id, created.id);
    }

    #[test]
    fn create_rejects_invalid_draft() {
        let mut store = store_with(&["a"]);
        let err = store.create(NoteDraft { title: String::new() }).unwrap_err();
        assert!(matches!(err, AppError::ValidationError(_)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_merges_only_present_fields() {
        let mut store = store_with(&["a"]);
        let id = store.all()[0].id;

        let unchanged = store.update(id, NotePatch { title: None }).unwrap();
        assert_eq!(unchanged.title, "a");

        let updated = store.update(id, NotePatch { title: Some("z".into()) }).unwrap();
        assert_eq!(updated.title, "z");
        assert_eq!(store.get(id).unwrap().title, "z");
        assert!(updated.updated_at >= updated.created_at);
    }

    #[test]
    fn update_missing_id_is_not_found_and_changes_nothing() {
        let mut store = store_with(&["a", "b"]);
        let snapshot = store.all().to_vec();

        let err = store
            .update(Uuid::new_v4(), NotePatch { title: Some("x".into()) })
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { kind: "Nota", .. }));
        assert_eq!(store.all(), snapshot.as_slice());
    }

    #[test]
    fn delete_removes_exactly_one() {
        let mut store = store_with(&["a", "b", "c"]);
        let id = store.all()[1].id;

        let removed = store.delete(id).unwrap();

        assert_eq!(removed.title, "b");
        assert_eq!(store.len(), 2);
        assert!(!store.contains(id));
        assert!(matches!(store.delete(id), Err(AppError::NotFound { .. })));
        assert_eq!(store.len(), 2);
    }
}
