use crate::ledger::{Category, Ledger, TransactionKind};
use crate::utils::make_id;

use super::{require_positive, require_text, ServiceError, ServiceResult};

pub struct CategoryService;

impl CategoryService {
    pub fn add(ledger: &mut Ledger, mut category: Category) -> ServiceResult<String> {
        Self::validate(&category)?;
        category.id = make_id("cat");
        let id = category.id.clone();
        ledger.categories.push(category);
        Ok(id)
    }

    pub fn update(ledger: &mut Ledger, category: Category) -> ServiceResult<()> {
        Self::validate(&category)?;
        let slot = ledger
            .category_mut(&category.id)
            .ok_or_else(|| ServiceError::NotFound(format!("Category `{}`", category.id)))?;
        *slot = category;
        Ok(())
    }

    /// Deletes the category without touching transactions or templates that
    /// still reference it.
    pub fn remove(ledger: &mut Ledger, id: &str) -> ServiceResult<Category> {
        let idx = ledger
            .categories
            .iter()
            .position(|category| category.id == id)
            .ok_or_else(|| ServiceError::NotFound(format!("Category `{id}`")))?;
        Ok(ledger.categories.remove(idx))
    }

    pub fn list(ledger: &Ledger, kind: Option<TransactionKind>) -> Vec<&Category> {
        ledger
            .categories
            .iter()
            .filter(|category| kind.map_or(true, |kind| category.kind == kind))
            .collect()
    }

    fn validate(category: &Category) -> ServiceResult<()> {
        require_text("Category name", &category.name)?;
        if let Some(budget) = category.budget {
            require_positive(budget)?;
        }
        Ok(())
    }
}
