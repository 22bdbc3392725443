//! Report assembly service.

use cumul_shared::GroupKey;
use rust_decimal::Decimal;

use crate::grouping::{Aggregator, GroupTree, KeySelector, MeasureSelector};

use super::types::{
    CashReceiptEntry, CashReceiptsReport, ENTREES_MONTANT, ENTREES_QTE, MONTANT_EXCEDENT,
    MONTANT_EXO, MONTANT_FACTURE, MONTANT_PAYE, MONTANT_TT, PaymentEntry,
    SITUATION_INITIALE_MONTANT, SITUATION_INITIALE_QTE, SORTIES_MONTANT, SORTIES_QTE,
    STOCK_MONTANT, STOCK_QTE, StockMovementEntry,
};

/// Service assembling the desk reports from already-fetched rows.
pub struct ReportService;

impl ReportService {
    /// Cashier summary: bank, then payment mode.
    ///
    /// Totals the paid, overpayment, and invoiced amounts at every level,
    /// in that column order. The invoiced amount is paid minus overpayment,
    /// computed per row.
    #[must_use]
    pub fn cashier_summary(rows: Vec<PaymentEntry>) -> GroupTree<PaymentEntry> {
        Self::cashier_aggregator().aggregate(rows)
    }

    /// The aggregator behind [`Self::cashier_summary`], for callers that
    /// re-run the same report across refreshes.
    #[must_use]
    pub fn cashier_aggregator() -> Aggregator<PaymentEntry> {
        Aggregator::new(
            vec![
                KeySelector::new("banque", |row: &PaymentEntry| {
                    text_key(row.nom_banque.as_deref())
                }),
                KeySelector::new("modePaiement", |row: &PaymentEntry| {
                    text_key(row.mode_paiement.as_deref())
                }),
            ],
            Self::payment_measures(),
        )
    }

    /// Bank daily summary: bank, then payment date.
    #[must_use]
    pub fn bank_daily_summary(rows: Vec<PaymentEntry>) -> GroupTree<PaymentEntry> {
        Self::bank_daily_aggregator().aggregate(rows)
    }

    /// The aggregator behind [`Self::bank_daily_summary`].
    #[must_use]
    pub fn bank_daily_aggregator() -> Aggregator<PaymentEntry> {
        Aggregator::new(
            vec![
                KeySelector::new("banque", |row: &PaymentEntry| {
                    text_key(row.nom_banque.as_deref())
                }),
                KeySelector::new("datePaiement", |row: &PaymentEntry| {
                    date_key(row.date_paiement)
                }),
            ],
            Self::payment_measures(),
        )
    }

    /// Cash receipts grouped by label, with the VAT split.
    ///
    /// The VAT rows are totalled apart and the before-tax figures derive by
    /// subtraction, column by column.
    #[must_use]
    pub fn cash_receipts_report(
        receipts: Vec<CashReceiptEntry>,
        tva: Vec<CashReceiptEntry>,
    ) -> CashReceiptsReport {
        let tree = Self::receipts_aggregator().aggregate(receipts);

        let tva_tt: Decimal = tva.iter().map(|row| row.montant_tt).sum();
        let tva_exo: Decimal = tva
            .iter()
            .map(|row| row.montant_exo.unwrap_or_default())
            .sum();

        let total_tt = tree.totals.get(MONTANT_TT);
        let total_exo = tree.totals.get(MONTANT_EXO);

        CashReceiptsReport {
            receipts: tree,
            total_tt,
            total_exo,
            tva_tt,
            tva_exo,
            htva_tt: total_tt - tva_tt,
            htva_exo: total_exo - tva_exo,
        }
    }

    /// The aggregator behind [`Self::cash_receipts_report`].
    #[must_use]
    pub fn receipts_aggregator() -> Aggregator<CashReceiptEntry> {
        Aggregator::new(
            vec![KeySelector::new("libelle", |row: &CashReceiptEntry| {
                text_key(row.libelle.as_deref())
            })],
            vec![
                MeasureSelector::new(MONTANT_TT, |row: &CashReceiptEntry| row.montant_tt),
                MeasureSelector::new(MONTANT_EXO, |row: &CashReceiptEntry| {
                    row.montant_exo.unwrap_or_default()
                }),
            ],
        )
    }

    /// Stock movement summary: category, then warehouse.
    ///
    /// Totals quantity and value for the four stock phases. The article
    /// count per group is the node count.
    #[must_use]
    pub fn stock_movement_summary(
        rows: Vec<StockMovementEntry>,
    ) -> GroupTree<StockMovementEntry> {
        Self::stock_aggregator().aggregate(rows)
    }

    /// The aggregator behind [`Self::stock_movement_summary`].
    #[must_use]
    pub fn stock_aggregator() -> Aggregator<StockMovementEntry> {
        Aggregator::new(
            vec![
                KeySelector::new("categorie", |row: &StockMovementEntry| {
                    GroupKey::new(row.categorie_label())
                }),
                KeySelector::new("magasin", |row: &StockMovementEntry| {
                    GroupKey::new(row.magasin_label())
                }),
            ],
            vec![
                MeasureSelector::new(SITUATION_INITIALE_QTE, |row: &StockMovementEntry| {
                    row.situation_initiale.unwrap_or_default().qte
                }),
                MeasureSelector::new(SITUATION_INITIALE_MONTANT, |row: &StockMovementEntry| {
                    row.situation_initiale.unwrap_or_default().montant
                }),
                MeasureSelector::new(ENTREES_QTE, |row: &StockMovementEntry| {
                    row.entrees.unwrap_or_default().qte
                }),
                MeasureSelector::new(ENTREES_MONTANT, |row: &StockMovementEntry| {
                    row.entrees.unwrap_or_default().montant
                }),
                MeasureSelector::new(SORTIES_QTE, |row: &StockMovementEntry| {
                    row.sorties.unwrap_or_default().qte
                }),
                MeasureSelector::new(SORTIES_MONTANT, |row: &StockMovementEntry| {
                    row.sorties.unwrap_or_default().montant
                }),
                MeasureSelector::new(STOCK_QTE, |row: &StockMovementEntry| {
                    row.stock.unwrap_or_default().qte
                }),
                MeasureSelector::new(STOCK_MONTANT, |row: &StockMovementEntry| {
                    row.stock.unwrap_or_default().montant
                }),
            ],
        )
    }

    fn payment_measures() -> Vec<MeasureSelector<PaymentEntry>> {
        vec![
            MeasureSelector::new(MONTANT_PAYE, |row: &PaymentEntry| row.montant_paye),
            MeasureSelector::new(MONTANT_EXCEDENT, |row: &PaymentEntry| {
                row.montant_excedent.unwrap_or_default()
            }),
            MeasureSelector::new(MONTANT_FACTURE, PaymentEntry::montant_facture),
        ]
    }
}

/// Key for an optional text column. Empty strings join the missing bucket,
/// matching how the desks treat blank cells.
fn text_key(value: Option<&str>) -> GroupKey {
    value
        .filter(|text| !text.is_empty())
        .map_or_else(GroupKey::missing, GroupKey::from)
}

/// Key for an optional date column, in ISO form.
fn date_key(value: Option<chrono::NaiveDate>) -> GroupKey {
    value.map_or_else(GroupKey::missing, |date| GroupKey::new(date.to_string()))
}
