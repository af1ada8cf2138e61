//! Reconciliation of an aggregate against an incoming transfer object
//!
//! Every referenced id is resolved before the target is touched. If any id is
//! unknown the call fails and the target keeps its previous state. On success
//! the scalar fields are overwritten and the reference collection is replaced
//! as a whole by the resolved set.

use std::future::Future;

use catalog_core::{Aggregate, EntityId, ReferenceSet};

use super::error::ServiceResult;

/// Make `target` match `dto`
///
/// `reference_ids` may contain duplicates; each id is resolved once.
/// `resolve` must fail with a not-found error for an unknown id.
pub async fn reconcile<A, D, I, C, R, Fut>(
    target: &mut A,
    dto: &D,
    reference_ids: I,
    copy_scalars: C,
    resolve: R,
) -> ServiceResult<()>
where
    A: Aggregate,
    I: IntoIterator<Item = EntityId>,
    C: FnOnce(&D, &mut A),
    R: Fn(EntityId) -> Fut,
    Fut: Future<Output = ServiceResult<A::Reference>>,
{
    let mut references = ReferenceSet::new();
    for id in reference_ids {
        if references.contains(id) {
            continue;
        }
        let reference = resolve(id).await?;
        references.insert(id, reference);
    }

    copy_scalars(dto, target);
    target.replace_references(references);
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::BTreeSet;

    use super::*;
    use crate::dto::{CategoryRefDto, ProductDto};
    use crate::services::error::category_not_found;
    use catalog_core::{Category, Product};

    fn catalog(id: EntityId) -> ServiceResult<Category> {
        match id.into_inner() {
            1 => Ok(Category::with_id(id, "Electronics")),
            2 => Ok(Category::with_id(id, "Books")),
            3 => Ok(Category::with_id(id, "Computers")),
            _ => Err(category_not_found(id)),
        }
    }

    fn existing_product() -> Product {
        let mut product = Product::new("PC Gamer", "Bom PC", 1200.0);
        product.id = Some(EntityId::new(4));
        product.categories = [(EntityId::new(3), Category::with_id(EntityId::new(3), "Computers"))]
            .into_iter()
            .collect();
        product
    }

    fn dto(category_ids: &[i64]) -> ProductDto {
        ProductDto {
            id: None,
            name: "PC Gamer Pro".to_string(),
            description: "Melhor PC".to_string(),
            price: 1500.0,
            image_url: None,
            release_date: None,
            categories: category_ids
                .iter()
                .map(|id| CategoryRefDto {
                    id: EntityId::new(*id),
                    name: String::new(),
                })
                .collect(),
        }
    }

    async fn run(target: &mut Product, dto: &ProductDto) -> ServiceResult<()> {
        reconcile(target, dto, dto.category_ids(), ProductDto::copy_scalars, |id| async move {
            catalog(id)
        })
        .await
    }

    #[tokio::test]
    async fn test_references_fully_replaced() {
        let mut product = existing_product();
        let dto = dto(&[1, 2]);

        run(&mut product, &dto).await.unwrap();

        assert_eq!(product.name, "PC Gamer Pro");
        assert_eq!(product.price, 1500.0);
        assert_eq!(
            product.categories.ids().collect::<BTreeSet<_>>(),
            BTreeSet::from([EntityId::new(1), EntityId::new(2)])
        );
        assert_eq!(
            product.categories.get(EntityId::new(1)).map(|c| c.name.as_str()),
            Some("Electronics")
        );
    }

    #[tokio::test]
    async fn test_empty_list_clears_references() {
        let mut product = existing_product();
        run(&mut product, &dto(&[])).await.unwrap();
        assert!(product.categories.is_empty());
        assert_eq!(product.id, Some(EntityId::new(4)));
    }

    #[tokio::test]
    async fn test_unknown_reference_leaves_target_untouched() {
        let mut product = existing_product();
        let before = product.clone();

        let err = run(&mut product, &dto(&[1, 42])).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(product, before);
    }

    #[tokio::test]
    async fn test_duplicate_ids_resolved_once() {
        let calls = Cell::new(0);
        let mut product = existing_product();
        let dto = dto(&[2, 2, 1, 2]);

        reconcile(
            &mut product,
            &dto,
            dto.category_ids(),
            ProductDto::copy_scalars,
            |id| {
                calls.set(calls.get() + 1);
                async move { catalog(id) }
            },
        )
        .await
        .unwrap();

        assert_eq!(calls.get(), 2);
        assert_eq!(product.categories.len(), 2);
    }
}
