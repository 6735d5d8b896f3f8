use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use fotoforma_core::{CartItemId, DomainError, DomainResult, EventId, Money, PhotoId};
use fotoforma_selection::CartItemSelection;

use crate::item::CartItem;

/// Structural, order-independent selection equality.
///
/// Same variant required; within a variant, photo/event id lists compare as
/// sorted sequences. Any pairing not listed here is unequal, so an unexpected
/// combination fails safe toward a new cart line instead of a wrong merge.
pub fn selections_equal(a: &CartItemSelection, b: &CartItemSelection) -> bool {
    match (a, b) {
        (
            CartItemSelection::Album { photo_ids: a },
            CartItemSelection::Album { photo_ids: b },
        ) => sorted(a) == sorted(b),
        (
            CartItemSelection::EventPhotosPerEvent { photos_by_event: a },
            CartItemSelection::EventPhotosPerEvent { photos_by_event: b },
        )
        | (
            CartItemSelection::DigitalUnit { photos_by_event: a },
            CartItemSelection::DigitalUnit { photos_by_event: b },
        ) => photo_maps_equal(a, b),
        (CartItemSelection::DigitalPackageFull, CartItemSelection::DigitalPackageFull) => true,
        (
            CartItemSelection::DigitalPackagePartial { event_ids: a },
            CartItemSelection::DigitalPackagePartial { event_ids: b },
        ) => sorted(a) == sorted(b),
        _ => false,
    }
}

fn sorted<T: Ord + Copy>(ids: &[T]) -> Vec<T> {
    let mut ids = ids.to_vec();
    ids.sort_unstable();
    ids
}

fn photo_maps_equal(
    a: &BTreeMap<EventId, Vec<PhotoId>>,
    b: &BTreeMap<EventId, Vec<PhotoId>>,
) -> bool {
    a.len() == b.len()
        && a.iter().all(|(event_id, photos)| {
            b.get(event_id)
                .is_some_and(|other| sorted(photos) == sorted(other))
        })
}

/// Ordered list of cart lines, scoped to one customer session.
///
/// Single source of truth for checkout. Expected to be owned by one logical
/// thread; a host with a background writer must wrap it in its own lock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find(&self, item_id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == item_id)
    }

    /// Add a line, merging into an existing `(product_id, selection)` match.
    ///
    /// This is the single merge point: a structurally equal selection for the
    /// same product increments that line's quantity by the incoming quantity;
    /// anything else appends. Returns the id of the surviving line.
    pub fn add_item(&mut self, item: CartItem) -> DomainResult<CartItemId> {
        if let Some(existing) = self.items.iter_mut().find(|existing| {
            existing.product_id == item.product_id
                && selections_equal(&existing.selection, &item.selection)
        }) {
            existing.quantity = existing
                .quantity
                .checked_add(item.quantity)
                .ok_or_else(|| DomainError::invariant("cart line quantity overflow"))?;
            tracing::debug!(
                item_id = %existing.id,
                quantity = existing.quantity,
                "merged selection into existing cart line"
            );
            return Ok(existing.id);
        }

        let id = item.id;
        tracing::debug!(item_id = %id, product_id = %item.product_id, "appended cart line");
        self.items.push(item);
        Ok(id)
    }

    /// Increase a line's quantity by one.
    pub fn increment(&mut self, item_id: CartItemId) -> DomainResult<u32> {
        let item = self.find_mut(item_id)?;
        item.quantity = item
            .quantity
            .checked_add(1)
            .ok_or_else(|| DomainError::invariant("cart line quantity overflow"))?;
        Ok(item.quantity)
    }

    /// Decrease a line's quantity by one, stopping at 1.
    ///
    /// Dropping below 1 is a no-op; removal is a separate, explicit operation.
    pub fn decrement(&mut self, item_id: CartItemId) -> DomainResult<u32> {
        let item = self.find_mut(item_id)?;
        if item.quantity > 1 {
            item.quantity -= 1;
        }
        Ok(item.quantity)
    }

    /// Remove one line, returning it.
    pub fn remove(&mut self, item_id: CartItemId) -> DomainResult<CartItem> {
        let index = self
            .items
            .iter()
            .position(|i| i.id == item_id)
            .ok_or_else(DomainError::not_found)?;
        Ok(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `unit_price * quantity` over all lines, checked.
    pub fn subtotal(&self) -> DomainResult<Money> {
        self.items
            .iter()
            .try_fold(Money::ZERO, |acc, item| acc.checked_add(item.line_total()?))
    }

    fn find_mut(&mut self, item_id: CartItemId) -> DomainResult<&mut CartItem> {
        self.items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(DomainError::not_found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use fotoforma_catalog::{AlbumConfig, ProductConfiguration};
    use fotoforma_core::ProductId;
    use fotoforma_selection::FinalizedSelection;

    fn money(units: u64) -> Money {
        Money::from_minor_units(units)
    }

    fn config() -> ProductConfiguration {
        ProductConfiguration::Album(
            AlbumConfig::new(1, 50, money(10_000), money(500)).unwrap(),
        )
    }

    fn album_item(
        product_id: ProductId,
        photo_ids: Vec<PhotoId>,
        unit_price: Money,
    ) -> CartItem {
        CartItem::new(
            product_id,
            "Álbum 20x30",
            config(),
            FinalizedSelection {
                selection: CartItemSelection::Album { photo_ids },
                unit_price,
            },
            Utc::now(),
        )
    }

    #[test]
    fn adding_an_identical_selection_merges_into_one_line() {
        let product = ProductId::new();
        let photos = vec![PhotoId::new(), PhotoId::new()];
        let mut cart = Cart::new();

        let first = cart
            .add_item(album_item(product, photos.clone(), money(11_000)))
            .unwrap();
        let second = cart
            .add_item(album_item(product, photos, money(11_000)))
            .unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn photo_order_does_not_affect_merging() {
        let product = ProductId::new();
        let p1 = PhotoId::new();
        let p2 = PhotoId::new();
        let mut cart = Cart::new();

        cart.add_item(album_item(product, vec![p1, p2], money(11_000)))
            .unwrap();
        cart.add_item(album_item(product, vec![p2, p1], money(11_000)))
            .unwrap();

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn different_products_or_selections_stay_separate_lines() {
        let product = ProductId::new();
        let shared = vec![PhotoId::new()];
        let mut cart = Cart::new();

        cart.add_item(album_item(product, shared.clone(), money(11_000)))
            .unwrap();
        // Same selection, different product.
        cart.add_item(album_item(ProductId::new(), shared, money(11_000)))
            .unwrap();
        // Same product, different selection.
        cart.add_item(album_item(product, vec![PhotoId::new()], money(11_000)))
            .unwrap();

        assert_eq!(cart.len(), 3);
    }

    #[test]
    fn cross_variant_selections_are_never_equal() {
        let album = CartItemSelection::Album { photo_ids: vec![] };
        let full = CartItemSelection::DigitalPackageFull;
        let partial = CartItemSelection::DigitalPackagePartial {
            event_ids: vec![],
        };

        assert!(!selections_equal(&album, &full));
        assert!(!selections_equal(&full, &album));
        assert!(!selections_equal(&full, &partial));
        assert!(selections_equal(&full, &CartItemSelection::DigitalPackageFull));
    }

    #[test]
    fn per_event_equality_is_order_independent_per_event() {
        let event = EventId::new();
        let p1 = PhotoId::new();
        let p2 = PhotoId::new();
        let a = CartItemSelection::EventPhotosPerEvent {
            photos_by_event: BTreeMap::from([(event, vec![p1, p2])]),
        };
        let b = CartItemSelection::EventPhotosPerEvent {
            photos_by_event: BTreeMap::from([(event, vec![p2, p1])]),
        };
        assert!(selections_equal(&a, &b));
        assert!(selections_equal(&b, &a));

        // Same photos under a different event key are a different selection.
        let c = CartItemSelection::EventPhotosPerEvent {
            photos_by_event: BTreeMap::from([(EventId::new(), vec![p1, p2])]),
        };
        assert!(!selections_equal(&a, &c));

        // A DigitalUnit with the same map is a different variant.
        let d = CartItemSelection::DigitalUnit {
            photos_by_event: BTreeMap::from([(event, vec![p1, p2])]),
        };
        assert!(!selections_equal(&a, &d));
    }

    #[test]
    fn decrement_stops_at_one() {
        let mut cart = Cart::new();
        let id = cart
            .add_item(album_item(ProductId::new(), vec![PhotoId::new()], money(500)))
            .unwrap();

        assert_eq!(cart.increment(id).unwrap(), 2);
        assert_eq!(cart.decrement(id).unwrap(), 1);
        // Floor: stays at 1, the line is not removed.
        assert_eq!(cart.decrement(id).unwrap(), 1);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn unknown_line_ids_are_not_found() {
        let mut cart = Cart::new();
        assert_eq!(cart.increment(CartItemId::new()).unwrap_err(), DomainError::NotFound);
        assert_eq!(cart.decrement(CartItemId::new()).unwrap_err(), DomainError::NotFound);
        assert_eq!(cart.remove(CartItemId::new()).unwrap_err(), DomainError::NotFound);
    }

    #[test]
    fn subtotal_is_sum_of_line_totals() {
        let mut cart = Cart::new();
        let a = cart
            .add_item(album_item(ProductId::new(), vec![PhotoId::new()], money(11_000)))
            .unwrap();
        cart.add_item(album_item(ProductId::new(), vec![PhotoId::new()], money(2_500)))
            .unwrap();
        cart.increment(a).unwrap();

        // 2 * 110.00 + 1 * 25.00
        assert_eq!(cart.subtotal().unwrap(), money(24_500));

        let removed = cart.remove(a).unwrap();
        assert_eq!(removed.line_total().unwrap(), money(22_000));
        assert_eq!(cart.subtotal().unwrap(), money(2_500));

        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal().unwrap(), Money::ZERO);
    }

    #[cfg(test)]
    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 1000,
                ..ProptestConfig::default()
            })]

            /// Property: adding the same (product, selection) n times yields
            /// exactly one line at quantity n.
            #[test]
            fn repeated_adds_never_duplicate_lines(n in 1u32..20) {
                let product = ProductId::new();
                let photos = vec![PhotoId::new(), PhotoId::new()];
                let mut cart = Cart::new();

                for _ in 0..n {
                    cart.add_item(album_item(product, photos.clone(), money(1_000))).unwrap();
                }

                prop_assert_eq!(cart.len(), 1);
                prop_assert_eq!(cart.items()[0].quantity, n);
                prop_assert_eq!(cart.subtotal().unwrap(), money(1_000 * u64::from(n)));
            }

            /// Property: selection equality is symmetric.
            #[test]
            fn selection_equality_is_symmetric(flip in any::<bool>(), shared in any::<bool>()) {
                let photos: Vec<PhotoId> = (0..3).map(|_| PhotoId::new()).collect();
                let mut reversed = photos.clone();
                reversed.reverse();

                let a = CartItemSelection::Album { photo_ids: photos };
                let b = if shared {
                    CartItemSelection::Album { photo_ids: reversed }
                } else {
                    CartItemSelection::Album { photo_ids: vec![PhotoId::new()] }
                };
                let (x, y) = if flip { (&b, &a) } else { (&a, &b) };

                prop_assert_eq!(selections_equal(x, y), selections_equal(y, x));
                prop_assert_eq!(selections_equal(&a, &b), shared);
            }

            /// Property: subtotal equals the sum over lines of price * quantity.
            #[test]
            fn subtotal_is_additive(prices in prop::collection::vec((1u64..100_000, 1u32..10), 0..8)) {
                let mut cart = Cart::new();
                let mut expected: u64 = 0;
                for (price, quantity) in prices {
                    let id = cart
                        .add_item(album_item(ProductId::new(), vec![PhotoId::new()], money(price)))
                        .unwrap();
                    for _ in 1..quantity {
                        cart.increment(id).unwrap();
                    }
                    expected += price * u64::from(quantity);
                }
                prop_assert_eq!(cart.subtotal().unwrap(), money(expected));
            }
        }
    }
}
