//! Closed price tables for the dakkapel configurator.
//!
//! Each table is keyed by one of the configuration enums through
//! [`PriceKey`], whose `index` is an exhaustive `match`. A table therefore
//! always holds exactly one amount per enum member: adding a variant without
//! extending the index and the default prices fails to compile, and a stored
//! table missing an entry is rejected by [`PriceTable::from_entries`].

use std::fmt;
use std::marker::PhantomData;

use rust_decimal::Decimal;
use thiserror::Error;

use super::{
    Color, DakkapelOption, FrameHeightClass, InsulationLevel, Material, PriceCategory, PriceEntry,
    SizeClass,
};

/// Key of the only entry in the [`PriceCategory::ExtraWindow`] category.
pub const EXTRA_WINDOW_KEY: &str = "per_window";

/// A closed enumeration usable as a price table key.
pub trait PriceKey: Copy + Eq + fmt::Debug + 'static {
    /// Every member, ordered by [`PriceKey::index`].
    const ALL: &'static [Self];

    fn index(self) -> usize;

    /// Code used in stored price entries.
    fn code(self) -> &'static str;

    fn from_code(code: &str) -> Option<Self>;
}

/// Errors raised while rebuilding a [`PriceTable`] from stored entries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PriceTableError {
    #[error("unknown {category} key '{key}'")]
    UnknownKey { category: PriceCategory, key: String },

    #[error("duplicate {category} entry '{key}'")]
    DuplicateEntry { category: PriceCategory, key: String },

    #[error("missing {category} entry '{key}'")]
    MissingEntry { category: PriceCategory, key: String },

    #[error("{category} entry '{key}' has negative amount {amount}")]
    NegativeAmount {
        category: PriceCategory,
        key: String,
        amount: Decimal,
    },
}

/// One amount per member of `K`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTable<K: PriceKey> {
    values: Vec<Decimal>,
    _key: PhantomData<K>,
}

impl<K: PriceKey> EnumTable<K> {
    /// Builds the table by calling `f` once per member of `K`.
    pub fn from_fn(f: impl Fn(K) -> Decimal) -> Self {
        let mut values = vec![Decimal::ZERO; K::ALL.len()];
        for key in K::ALL {
            values[key.index()] = f(*key);
        }
        Self {
            values,
            _key: PhantomData,
        }
    }

    pub fn get(
        &self,
        key: K,
    ) -> Decimal {
        self.values[key.index()]
    }

    pub fn set(
        &mut self,
        key: K,
        amount: Decimal,
    ) {
        self.values[key.index()] = amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, Decimal)> + '_ {
        K::ALL.iter().map(|key| (*key, self.get(*key)))
    }
}

/// Collects stored entries for one category and checks totality.
struct TableBuilder<K: PriceKey> {
    category: PriceCategory,
    values: Vec<Option<Decimal>>,
    _key: PhantomData<K>,
}

impl<K: PriceKey> TableBuilder<K> {
    fn new(category: PriceCategory) -> Self {
        Self {
            category,
            values: vec![None; K::ALL.len()],
            _key: PhantomData,
        }
    }

    fn insert(
        &mut self,
        entry: &PriceEntry,
    ) -> Result<(), PriceTableError> {
        let key = K::from_code(&entry.key).ok_or_else(|| PriceTableError::UnknownKey {
            category: self.category,
            key: entry.key.clone(),
        })?;

        let slot = &mut self.values[key.index()];
        if slot.is_some() {
            return Err(PriceTableError::DuplicateEntry {
                category: self.category,
                key: entry.key.clone(),
            });
        }
        *slot = Some(entry.amount);
        Ok(())
    }

    fn finish(self) -> Result<EnumTable<K>, PriceTableError> {
        let mut table = EnumTable::from_fn(|_| Decimal::ZERO);
        for key in K::ALL {
            let amount =
                self.values[key.index()].ok_or_else(|| PriceTableError::MissingEntry {
                    category: self.category,
                    key: key.code().to_string(),
                })?;
            table.set(*key, amount);
        }
        Ok(table)
    }
}

/// Every amount the dakkapel calculator needs, excluding VAT.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceTable {
    pub base_prices: EnumTable<SizeClass>,
    pub material_multipliers: EnumTable<Material>,
    pub option_costs: EnumTable<DakkapelOption>,
    pub color_surcharges: EnumTable<Color>,
    pub insulation_surcharges: EnumTable<InsulationLevel>,
    pub frame_height_surcharges: EnumTable<FrameHeightClass>,
    pub extra_window_cost: Decimal,
}

impl Default for PriceTable {
    /// The standard price list used when no stored table is configured.
    fn default() -> Self {
        Self {
            base_prices: EnumTable::from_fn(|size| match size {
                SizeClass::Compact => Decimal::from(6_950),
                SizeClass::Small => Decimal::from(8_450),
                SizeClass::Medium => Decimal::from(9_950),
                SizeClass::Large => Decimal::from(11_450),
                SizeClass::ExtraLarge => Decimal::from(12_950),
            }),
            material_multipliers: EnumTable::from_fn(|material| match material {
                Material::Pvc => Decimal::ONE,
                Material::Wood => Decimal::new(115, 2),
                Material::Aluminium => Decimal::new(125, 2),
            }),
            option_costs: EnumTable::from_fn(|option| match option {
                DakkapelOption::ElectricRollerShutter => Decimal::from(395),
                DakkapelOption::VentilationGrilles => Decimal::from(45),
                DakkapelOption::InsectScreens => Decimal::from(95),
                DakkapelOption::ZincGutter => Decimal::from(295),
                DakkapelOption::InteriorFinishing => Decimal::from(695),
                DakkapelOption::ExistingDormerRemoval => Decimal::from(950),
            }),
            color_surcharges: EnumTable::from_fn(|color| match color {
                Color::White => Decimal::ZERO,
                Color::Cream => Decimal::from(145),
                Color::Anthracite => Decimal::from(295),
                Color::Black => Decimal::from(295),
                Color::WoodGrain => Decimal::from(595),
            }),
            insulation_surcharges: EnumTable::from_fn(|level| match level {
                InsulationLevel::Standard => Decimal::ZERO,
                InsulationLevel::Improved => Decimal::from(395),
                InsulationLevel::Premium => Decimal::from(795),
            }),
            frame_height_surcharges: EnumTable::from_fn(|height| match height {
                FrameHeightClass::Standard => Decimal::ZERO,
                FrameHeightClass::Raised => Decimal::from(195),
                FrameHeightClass::High => Decimal::from(395),
                FrameHeightClass::ExtraHigh => Decimal::from(595),
            }),
            extra_window_cost: Decimal::from(425),
        }
    }
}

impl PriceTable {
    /// Flattens the table into storage rows, category by category.
    pub fn entries(&self) -> Vec<PriceEntry> {
        fn push<K: PriceKey>(
            out: &mut Vec<PriceEntry>,
            category: PriceCategory,
            table: &EnumTable<K>,
        ) {
            out.extend(
                table
                    .iter()
                    .map(|(key, amount)| PriceEntry::new(category, key.code(), amount)),
            );
        }

        let mut entries = Vec::new();
        push(&mut entries, PriceCategory::BasePrice, &self.base_prices);
        push(&mut entries, PriceCategory::Material, &self.material_multipliers);
        push(&mut entries, PriceCategory::Option, &self.option_costs);
        push(&mut entries, PriceCategory::Color, &self.color_surcharges);
        push(&mut entries, PriceCategory::Insulation, &self.insulation_surcharges);
        push(&mut entries, PriceCategory::FrameHeight, &self.frame_height_surcharges);
        entries.push(PriceEntry::new(
            PriceCategory::ExtraWindow,
            EXTRA_WINDOW_KEY,
            self.extra_window_cost,
        ));
        entries
    }

    /// Rebuilds a table from stored rows.
    ///
    /// # Errors
    ///
    /// Returns [`PriceTableError`] if an entry is unknown, duplicated or
    /// negative, or if any member of any table has no entry.
    pub fn from_entries(entries: &[PriceEntry]) -> Result<Self, PriceTableError> {
        let mut base_prices = TableBuilder::<SizeClass>::new(PriceCategory::BasePrice);
        let mut materials = TableBuilder::<Material>::new(PriceCategory::Material);
        let mut options = TableBuilder::<DakkapelOption>::new(PriceCategory::Option);
        let mut colors = TableBuilder::<Color>::new(PriceCategory::Color);
        let mut insulation = TableBuilder::<InsulationLevel>::new(PriceCategory::Insulation);
        let mut frame_heights = TableBuilder::<FrameHeightClass>::new(PriceCategory::FrameHeight);
        let mut extra_window_cost = None;

        for entry in entries {
            if entry.amount < Decimal::ZERO {
                return Err(PriceTableError::NegativeAmount {
                    category: entry.category,
                    key: entry.key.clone(),
                    amount: entry.amount,
                });
            }

            match entry.category {
                PriceCategory::BasePrice => base_prices.insert(entry)?,
                PriceCategory::Material => materials.insert(entry)?,
                PriceCategory::Option => options.insert(entry)?,
                PriceCategory::Color => colors.insert(entry)?,
                PriceCategory::Insulation => insulation.insert(entry)?,
                PriceCategory::FrameHeight => frame_heights.insert(entry)?,
                PriceCategory::ExtraWindow => {
                    if entry.key.trim() != EXTRA_WINDOW_KEY {
                        return Err(PriceTableError::UnknownKey {
                            category: entry.category,
                            key: entry.key.clone(),
                        });
                    }
                    if extra_window_cost.replace(entry.amount).is_some() {
                        return Err(PriceTableError::DuplicateEntry {
                            category: entry.category,
                            key: entry.key.clone(),
                        });
                    }
                }
            }
        }

        Ok(Self {
            base_prices: base_prices.finish()?,
            material_multipliers: materials.finish()?,
            option_costs: options.finish()?,
            color_surcharges: colors.finish()?,
            insulation_surcharges: insulation.finish()?,
            frame_height_surcharges: frame_heights.finish()?,
            extra_window_cost: extra_window_cost.ok_or_else(|| PriceTableError::MissingEntry {
                category: PriceCategory::ExtraWindow,
                key: EXTRA_WINDOW_KEY.to_string(),
            })?,
        })
    }
}
