//! Wine inventory entity.
//!
//! A [`Wine`] is a bottle line in a user's cellar. Its quantity is guarded by
//! the entity's own mutators: every mutator validates first and only then
//! touches state, so a returned [`DomainError`] always leaves the entity as it
//! was. Successful mutations refresh `updated_at` from the supplied clock.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::identifier::define_identifier;
use super::{DomainError, UserId};

define_identifier!(
    /// Stable wine identifier.
    WineId,
    "wine id"
);

/// Broad style of a wine, driving the consumption heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WineType {
    Red,
    White,
    Rose,
    Sparkling,
}

impl WineType {
    /// Wire name of the type.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::White => "white",
            Self::Rose => "rose",
            Self::Sparkling => "sparkling",
        }
    }
}

impl fmt::Display for WineType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WineType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "red" => Ok(Self::Red),
            "white" => Ok(Self::White),
            "rose" => Ok(Self::Rose),
            "sparkling" => Ok(Self::Sparkling),
            other => Err(DomainError::invalid_data(format!(
                "wine type must be red, white, rose or sparkling, got {other}"
            ))),
        }
    }
}

/// Convert a signed bottle count into a stored quantity.
///
/// # Examples
/// ```
/// use celleret::domain::{DomainErrorKind, parse_quantity};
///
/// assert_eq!(parse_quantity(6), Ok(6));
/// let err = parse_quantity(-1).expect_err("negative quantities are rejected");
/// assert_eq!(err.kind(), DomainErrorKind::InvalidQuantity);
/// ```
pub fn parse_quantity(raw: i64) -> Result<u32, DomainError> {
    u32::try_from(raw).map_err(|_| DomainError::invalid_quantity(raw))
}

/// Every attribute a caller supplies when adding a wine to the cellar.
#[derive(Debug, Clone, PartialEq)]
pub struct WineDraft {
    pub id: WineId,
    pub user_id: UserId,
    pub name: String,
    pub vintage: i32,
    pub coupage: String,
    pub wine_type: WineType,
    pub cellar_entry_date: DateTime<Utc>,
    pub quantity: u32,
    pub alcohol_content: f64,
    pub denomination: String,
    pub winery: String,
    pub suggested_consumption_date: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// Plain-data projection of a [`Wine`], including timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WineSnapshot {
    pub id: WineId,
    pub user_id: UserId,
    pub name: String,
    pub vintage: i32,
    pub coupage: String,
    #[serde(rename = "type")]
    pub wine_type: WineType,
    pub cellar_entry_date: DateTime<Utc>,
    pub quantity: u32,
    pub alcohol_content: f64,
    pub denomination: String,
    pub winery: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_consumption_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wine held in a user's cellar.
///
/// ## Invariants
/// - `quantity` is never negative; the `u32` storage makes this structural
///   and mutators reject input that would break it.
/// - `updated_at` moves only on successful mutation.
/// - `vintage` is not checked against the calendar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "WineSnapshot", into = "WineSnapshot")]
pub struct Wine {
    snapshot: WineSnapshot,
}

impl Wine {
    /// Create a wine, stamping both timestamps with the clock's current time.
    pub fn create(draft: WineDraft, clock: &dyn Clock) -> Self {
        let now = clock.utc();
        let WineDraft {
            id,
            user_id,
            name,
            vintage,
            coupage,
            wine_type,
            cellar_entry_date,
            quantity,
            alcohol_content,
            denomination,
            winery,
            suggested_consumption_date,
            notes,
        } = draft;
        Self {
            snapshot: WineSnapshot {
                id,
                user_id,
                name,
                vintage,
                coupage,
                wine_type,
                cellar_entry_date,
                quantity,
                alcohol_content,
                denomination,
                winery,
                suggested_consumption_date,
                notes,
                created_at: now,
                updated_at: now,
            },
        }
    }

    /// Rebuild a wine from storage; timestamps are taken verbatim.
    pub fn reconstitute(snapshot: WineSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn id(&self) -> &WineId {
        &self.snapshot.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.snapshot.user_id
    }

    pub fn name(&self) -> &str {
        self.snapshot.name.as_str()
    }

    pub fn vintage(&self) -> i32 {
        self.snapshot.vintage
    }

    pub fn coupage(&self) -> &str {
        self.snapshot.coupage.as_str()
    }

    pub fn wine_type(&self) -> WineType {
        self.snapshot.wine_type
    }

    pub fn cellar_entry_date(&self) -> DateTime<Utc> {
        self.snapshot.cellar_entry_date
    }

    pub fn quantity(&self) -> u32 {
        self.snapshot.quantity
    }

    pub fn alcohol_content(&self) -> f64 {
        self.snapshot.alcohol_content
    }

    pub fn denomination(&self) -> &str {
        self.snapshot.denomination.as_str()
    }

    pub fn winery(&self) -> &str {
        self.snapshot.winery.as_str()
    }

    pub fn suggested_consumption_date(&self) -> Option<DateTime<Utc>> {
        self.snapshot.suggested_consumption_date
    }

    pub fn notes(&self) -> Option<&str> {
        self.snapshot.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.snapshot.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.snapshot.updated_at
    }

    /// Set the bottle count to exactly `new_quantity`.
    ///
    /// # Errors
    /// [`DomainError::InvalidQuantity`] when `new_quantity` is negative or
    /// does not fit the stored range.
    pub fn update_quantity(
        &mut self,
        new_quantity: i64,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let quantity = parse_quantity(new_quantity)?;
        self.snapshot.quantity = quantity;
        self.touch(clock);
        Ok(())
    }

    /// Add `amount` bottles.
    ///
    /// # Errors
    /// [`DomainError::InvalidAmount`] when `amount <= 0`;
    /// [`DomainError::InvalidQuantity`] when the total would overflow.
    ///
    /// # Examples
    /// ```
    /// # use celleret::domain::{UserId, Wine, WineDraft, WineId, WineType};
    /// # use chrono::Utc;
    /// # use mockable::DefaultClock;
    /// # let draft = WineDraft {
    /// #     id: WineId::new("w-1").unwrap(),
    /// #     user_id: UserId::new("u-1").unwrap(),
    /// #     name: "Rioja".into(),
    /// #     vintage: 2018,
    /// #     coupage: "Tempranillo".into(),
    /// #     wine_type: WineType::Red,
    /// #     cellar_entry_date: Utc::now(),
    /// #     quantity: 2,
    /// #     alcohol_content: 13.5,
    /// #     denomination: "DOCa Rioja".into(),
    /// #     winery: "Muga".into(),
    /// #     suggested_consumption_date: None,
    /// #     notes: None,
    /// # };
    /// let mut wine = Wine::create(draft, &DefaultClock);
    /// wine.add_bottles(4, &DefaultClock).expect("positive amount");
    /// assert_eq!(wine.quantity(), 6);
    /// assert!(wine.add_bottles(0, &DefaultClock).is_err());
    /// ```
    pub fn add_bottles(&mut self, amount: i64, clock: &dyn Clock) -> Result<(), DomainError> {
        if amount <= 0 {
            return Err(DomainError::invalid_amount(amount));
        }
        let total = i64::from(self.snapshot.quantity)
            .checked_add(amount)
            .ok_or_else(|| DomainError::invalid_quantity(i64::MAX))?;
        let quantity = parse_quantity(total)?;
        self.snapshot.quantity = quantity;
        self.touch(clock);
        Ok(())
    }

    /// Remove `amount` bottles. All or nothing.
    ///
    /// # Errors
    /// [`DomainError::InvalidAmount`] when `amount <= 0`;
    /// [`DomainError::InsufficientStock`] when `amount` exceeds the stock.
    pub fn remove_bottles(&mut self, amount: i64, clock: &dyn Clock) -> Result<(), DomainError> {
        if amount <= 0 {
            return Err(DomainError::invalid_amount(amount));
        }
        let available = self.snapshot.quantity;
        let remaining = i64::from(available) - amount;
        if remaining < 0 {
            return Err(DomainError::insufficient_stock(amount, available));
        }
        self.snapshot.quantity = parse_quantity(remaining)?;
        self.touch(clock);
        Ok(())
    }

    /// Replace the tasting notes; an empty string is kept as-is.
    pub fn update_notes(&mut self, notes: impl Into<String>, clock: &dyn Clock) {
        self.snapshot.notes = Some(notes.into());
        self.touch(clock);
    }

    /// Replace the suggested consumption date without cross-checking other dates.
    pub fn update_suggested_consumption_date(&mut self, date: DateTime<Utc>, clock: &dyn Clock) {
        self.snapshot.suggested_consumption_date = Some(date);
        self.touch(clock);
    }

    /// `true` once the suggested consumption date has been reached.
    pub fn is_ready_to_consume(&self, clock: &dyn Clock) -> bool {
        self.snapshot
            .suggested_consumption_date
            .is_some_and(|date| clock.utc() >= date)
    }

    /// `true` when no bottles remain.
    pub fn is_empty(&self) -> bool {
        self.snapshot.quantity == 0
    }

    /// Whole years between the vintage and the clock's current UTC year.
    pub fn age(&self, clock: &dyn Clock) -> i32 {
        clock.utc().year() - self.snapshot.vintage
    }

    /// Copy every attribute into a [`WineSnapshot`].
    pub fn to_snapshot(&self) -> WineSnapshot {
        self.snapshot.clone()
    }

    fn touch(&mut self, clock: &dyn Clock) {
        self.snapshot.updated_at = clock.utc();
    }
}

impl From<WineSnapshot> for Wine {
    fn from(value: WineSnapshot) -> Self {
        Self::reconstitute(value)
    }
}

impl From<Wine> for WineSnapshot {
    fn from(value: Wine) -> Self {
        value.snapshot
    }
}
