//! Report data types.
//!
//! Wire rows come from the upstream accounting endpoints: camelCase field
//! names, French domain vocabulary, and frequently incomplete. Every
//! optional column deserializes leniently so one sparse row never sinks a
//! whole payload.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::grouping::GroupTree;

use super::period::Dated;

/// Measure name for the paid amount.
pub const MONTANT_PAYE: &str = "montantPaye";
/// Measure name for the invoiced amount (paid minus overpayment).
pub const MONTANT_FACTURE: &str = "montantFacture";
/// Measure name for the overpayment amount.
pub const MONTANT_EXCEDENT: &str = "montantExcedent";
/// Measure name for the all-taxes receipt amount.
pub const MONTANT_TT: &str = "montantTT";
/// Measure name for the tax-exempt receipt amount.
pub const MONTANT_EXO: &str = "montantExo";
/// Measure name for the opening-stock quantity.
pub const SITUATION_INITIALE_QTE: &str = "situationInitialeQte";
/// Measure name for the opening-stock value.
pub const SITUATION_INITIALE_MONTANT: &str = "situationInitialeMontant";
/// Measure name for the stock-in quantity.
pub const ENTREES_QTE: &str = "entreesQte";
/// Measure name for the stock-in value.
pub const ENTREES_MONTANT: &str = "entreesMontant";
/// Measure name for the stock-out quantity.
pub const SORTIES_QTE: &str = "sortiesQte";
/// Measure name for the stock-out value.
pub const SORTIES_MONTANT: &str = "sortiesMontant";
/// Measure name for the closing-stock quantity.
pub const STOCK_QTE: &str = "stockQte";
/// Measure name for the closing-stock value.
pub const STOCK_MONTANT: &str = "stockMontant";

/// One cashier payment row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentEntry {
    /// Receiving bank.
    pub nom_banque: Option<String>,
    /// Payment mode (cheque, espece, virement).
    pub mode_paiement: Option<String>,
    /// Payment date.
    pub date_paiement: Option<NaiveDate>,
    /// Invoice number the payment settles.
    pub facture_id: Option<i64>,
    /// Payment slip reference.
    pub reference: Option<String>,
    /// Paying client.
    pub nom_client: Option<String>,
    /// Paid amount.
    #[serde(default)]
    pub montant_paye: Decimal,
    /// Overpayment carried on the row, when any.
    pub montant_excedent: Option<Decimal>,
}

impl PaymentEntry {
    /// Invoiced amount: paid minus overpayment.
    #[must_use]
    pub fn montant_facture(&self) -> Decimal {
        self.montant_paye - self.montant_excedent.unwrap_or_default()
    }
}

impl Dated for PaymentEntry {
    fn report_date(&self) -> Option<NaiveDate> {
        self.date_paiement
    }
}

/// One cash receipt row. The same shape carries the VAT rows of the
/// receipts endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashReceiptEntry {
    /// Receipt identifier.
    pub recette_id: Option<i64>,
    /// Ledger account number.
    pub num_compte: Option<String>,
    /// Receipt label the desk groups by.
    pub libelle: Option<String>,
    /// All-taxes amount.
    #[serde(default)]
    pub montant_tt: Decimal,
    /// Tax-exempt amount, when any.
    pub montant_exo: Option<Decimal>,
    /// Entry date.
    pub date_saisie: Option<NaiveDate>,
}

impl Dated for CashReceiptEntry {
    fn report_date(&self) -> Option<NaiveDate> {
        self.date_saisie
    }
}

/// Quantity and value of one stock phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityValue {
    /// Quantity.
    #[serde(default)]
    pub qte: Decimal,
    /// Value.
    #[serde(default)]
    pub montant: Decimal,
}

/// One stock movement row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovementEntry {
    /// Movement slip number.
    pub numero_piece: Option<String>,
    /// Article category.
    pub categorie: Option<String>,
    /// Warehouse name.
    pub magasin_nom: Option<String>,
    /// Warehouse identifier, used when the name is absent.
    pub magasin_id: Option<String>,
    /// Opening stock.
    pub situation_initiale: Option<QuantityValue>,
    /// Stock in over the period.
    pub entrees: Option<QuantityValue>,
    /// Stock out over the period.
    pub sorties: Option<QuantityValue>,
    /// Closing stock.
    pub stock: Option<QuantityValue>,
}

impl StockMovementEntry {
    /// Category label, with the desk's fallback for unclassified articles.
    #[must_use]
    pub fn categorie_label(&self) -> &str {
        self.categorie
            .as_deref()
            .filter(|categorie| !categorie.is_empty())
            .unwrap_or("Non classe")
    }

    /// Warehouse label: name, then identifier, then the desk's fallback.
    #[must_use]
    pub fn magasin_label(&self) -> &str {
        self.magasin_nom
            .as_deref()
            .filter(|nom| !nom.is_empty())
            .or_else(|| self.magasin_id.as_deref().filter(|id| !id.is_empty()))
            .unwrap_or("Magasin non defini")
    }
}

/// Cash receipts report: the grouped receipts plus the VAT split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashReceiptsReport {
    /// Receipts grouped by label.
    pub receipts: GroupTree<CashReceiptEntry>,
    /// All-taxes total over every receipt, VAT included.
    pub total_tt: Decimal,
    /// Tax-exempt total over every receipt.
    pub total_exo: Decimal,
    /// All-taxes total of the VAT rows alone.
    pub tva_tt: Decimal,
    /// Tax-exempt total of the VAT rows alone.
    pub tva_exo: Decimal,
    /// Before-tax all-taxes figure: `total_tt - tva_tt`.
    pub htva_tt: Decimal,
    /// Before-tax exempt figure: `total_exo - tva_exo`.
    pub htva_exo: Decimal,
}
