// src/db/catalog_repo.rs

use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::store::EntityStore,
    models::catalog::{Category, Subcategory, SubcategoryDraft, SubcategoryPatch},
};

const SUBCATEGORY: &str = "Subcategoria";

// ---
// Subcategorias: coleção filha, sempre acessada pelo id da categoria dona
// ---
impl EntityStore<Category> {
    /// Ids de subcategoria são únicos entre todas as categorias.
    fn subcategory_id_taken(&self, id: Uuid) -> bool {
        self.all()
            .iter()
            .any(|c| c.subcategories.iter().any(|s| s.id == id))
    }

    pub fn create_subcategory(
        &mut self,
        category_id: Uuid,
        draft: SubcategoryDraft,
    ) -> Result<Subcategory, AppError> {
        // Pai primeiro: NotFound tem precedência sobre validação
        self.find(category_id)?;
        draft.validate()?;

        let id = loop {
            let id = Uuid::new_v4();
            if !self.subcategory_id_taken(id) {
                break id;
            }
        };

        let category = self.get_mut(category_id)?;
        let subcategory = Subcategory {
            id,
            category_id,
            name: draft.name,
            description: draft.description,
        };
        category.subcategories.push(subcategory.clone());
        category.updated_at = Utc::now();
        Ok(subcategory)
    }

    pub fn update_subcategory(
        &mut self,
        category_id: Uuid,
        subcategory_id: Uuid,
        patch: SubcategoryPatch,
    ) -> Result<Subcategory, AppError> {
        let category = self.get_mut(category_id)?;
        let subcategory = category
            .subcategories
            .iter_mut()
            .find(|s| s.id == subcategory_id)
            .ok_or_else(|| AppError::not_found(SUBCATEGORY, subcategory_id))?;

        patch.validate()?;

        if let Some(name) = patch.name {
            subcategory.name = name;
        }
        if let Some(description) = patch.description {
            subcategory.description = Some(description);
        }
        let updated = subcategory.clone();
        category.updated_at = Utc::now();
        Ok(updated)
    }

    pub fn delete_subcategory(
        &mut self,
        category_id: Uuid,
        subcategory_id: Uuid,
    ) -> Result<Subcategory, AppError> {
        let category = self.get_mut(category_id)?;
        let pos = category
            .subcategories
            .iter()
            .position(|s| s.id == subcategory_id)
            .ok_or_else(|| AppError::not_found(SUBCATEGORY, subcategory_id))?;
        let removed = category.subcategories.remove(pos);
        category.updated_at = Utc::now();
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::CategoryDraft;

    fn draft(name: &str) -> CategoryDraft {
        CategoryDraft { name: name.into(), description: None }
    }

    #[test]
    fn subcategories_are_scoped_by_parent() {
        let mut store = EntityStore::<Category>::new();
        let electronics = store.create(draft("Electronics")).unwrap();
        let clothing = store.create(draft("Clothing")).unwrap();

        let computers = store.create_subcategory(electronics.id, draft("Computers")).unwrap();
        assert_eq!(computers.category_id, electronics.id);
        assert_eq!(store.get(electronics.id).unwrap().subcategories.len(), 1);
        assert!(store.get(clothing.id).unwrap().subcategories.is_empty());

        // Filho certo, pai errado
        let err = store
            .delete_subcategory(clothing.id, computers.id)
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: "Subcategoria", .. }));
        assert_eq!(store.get(electronics.id).unwrap().subcategories.len(), 1);
    }

    #[test]
    fn missing_parent_is_not_found() {
        let mut store = EntityStore::<Category>::new();
        let err = store.create_subcategory(Uuid::new_v4(), draft("X")).unwrap_err();
        assert!(matches!(err, AppError::NotFound { kind: "Categoria", .. }));
    }

    #[test]
    fn update_and_delete_subcategory() {
        let mut store = EntityStore::<Category>::new();
        let cat = store.create(draft("Clothing")).unwrap();
        let casual = store.create_subcategory(cat.id, draft("Casual")).unwrap();
        let formal = store.create_subcategory(cat.id, draft("Formal")).unwrap();

        let renamed = store
            .update_subcategory(
                cat.id,
                casual.id,
                SubcategoryPatch { name: Some("Streetwear".into()), description: None },
            )
            .unwrap();
        assert_eq!(renamed.name, "Streetwear");

        store.delete_subcategory(cat.id, casual.id).unwrap();
        let remaining = &store.get(cat.id).unwrap().subcategories;
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, formal.id);
    }
}
