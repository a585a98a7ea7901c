//! デモ用の抽出結果
//!
//! 単一ファイルの抽出でサーバーに接続できない場合に、
//! デモモードが有効なら抽出種別に応じたサンプル結果を表示する。
//! 結果には `demo: true` が付く。

use crate::types::{ExtractionResult, ExtractionType};
use serde_json::{json, Value};

fn invoice_data() -> Value {
    json!({
        "invoice_number": "INV-2024-001",
        "invoice_date": "2024-01-15",
        "due_date": "2024-02-14",
        "vendor": {
            "name": "ABC Office Supplies Inc.",
            "address": "123 Business Street, Suite 100, New York, NY 10001",
            "contact": "billing@abcoffice.com"
        },
        "customer": {
            "name": "XYZ Corporation",
            "address": "456 Corporate Blvd, Los Angeles, CA 90210"
        },
        "line_items": [
            {"description": "Premium Copy Paper (case)", "quantity": "10", "rate": "45.00", "amount": "450.00"},
            {"description": "Ink Cartridges - Black", "quantity": "5", "rate": "32.50", "amount": "162.50"},
            {"description": "Ergonomic Office Chair", "quantity": "2", "rate": "299.99", "amount": "599.98"}
        ],
        "subtotal": "1212.48",
        "tax": "97.00",
        "total": "1309.48",
        "payment_terms": "Net 30",
        "confidence_score": "9"
    })
}

fn contract_data() -> Value {
    json!({
        "contract_type": "Software Development Services Agreement",
        "parties": {
            "party_a": "TechSolutions LLC, a Delaware limited liability company",
            "party_b": "Global Retail Inc., a California corporation"
        },
        "effective_date": "2024-01-01",
        "expiration_date": "2024-12-31",
        "contract_value": "$250,000",
        "key_terms": [
            "Monthly progress reports required",
            "Source code ownership transfers on final payment",
            "Two rounds of revisions included per milestone"
        ],
        "obligations": {
            "party_a_obligations": ["Deliver milestones on schedule", "Provide 90 days of post-launch support"],
            "party_b_obligations": ["Pay invoices within 30 days", "Provide timely feedback on deliverables"]
        },
        "termination_clauses": ["Either party may terminate with 30 days written notice", "Immediate termination for material breach"],
        "governing_law": "State of California",
        "renewal_terms": "Automatic 12-month renewal unless cancelled 60 days prior",
        "confidentiality": "Mutual confidentiality for 3 years after termination",
        "confidence_score": "8"
    })
}

fn general_data() -> Value {
    json!({
        "document_type": "Quarterly Business Report",
        "key_topics": ["Revenue growth", "Market expansion", "Operational efficiency"],
        "important_dates": ["2024-03-31", "2024-04-15"],
        "key_figures": ["$2.4M revenue", "18% growth", "3 new markets"],
        "entities": {
            "people": ["Jane Smith", "Robert Chen"],
            "organizations": ["Northwind Traders", "Contoso Ltd."],
            "locations": ["Seattle", "Toronto"]
        },
        "action_items": ["Finalize Q2 budget", "Hire regional sales lead"],
        "confidence_score": "7"
    })
}

fn raw_text(kind: ExtractionType) -> &'static str {
    match kind {
        ExtractionType::Invoice => {
            "INVOICE\n\nABC Office Supplies Inc.\n123 Business Street, Suite 100\nNew York, NY 10001\n\n\
             Invoice #: INV-2024-001\nDate: January 15, 2024\nDue: February 14, 2024\n\n\
             Bill To: XYZ Corporation\n\n\
             Premium Copy Paper (case)    10 x $45.00     $450.00\n\
             Ink Cartridges - Black        5 x $32.50     $162.50\n\
             Ergonomic Office Chair        2 x $299.99    $599.98\n\n\
             Subtotal: $1,212.48\nTax: $97.00\nTOTAL: $1,309.48\n\nPayment Terms: Net 30"
        }
        ExtractionType::Contract => {
            "SOFTWARE DEVELOPMENT SERVICES AGREEMENT\n\n\
             This Agreement is entered into as of January 1, 2024 by and between TechSolutions LLC \
             (\"Provider\") and Global Retail Inc. (\"Client\").\n\n\
             1. SERVICES. Provider shall deliver the milestones described in Exhibit A.\n\
             2. COMPENSATION. Client shall pay a total of $250,000.\n\
             3. TERM. This Agreement expires December 31, 2024.\n\
             4. TERMINATION. Either party may terminate with 30 days written notice.\n\
             5. GOVERNING LAW. State of California."
        }
        ExtractionType::General => {
            "QUARTERLY BUSINESS REPORT - Q1 2024\n\n\
             Revenue reached $2.4M, an 18% increase over the prior quarter. \
             The company entered 3 new markets including Seattle and Toronto.\n\n\
             Next steps: finalize the Q2 budget by April 15 and hire a regional sales lead."
        }
    }
}

fn summary(kind: ExtractionType) -> &'static str {
    match kind {
        ExtractionType::Invoice => {
            "Invoice INV-2024-001 from ABC Office Supplies Inc. to XYZ Corporation for office \
             supplies and furniture. Three line items totalling $1,212.48 before tax; the amount \
             due is $1,309.48, payable within 30 days (by February 14, 2024)."
        }
        ExtractionType::Contract => {
            "A one-year software development services agreement between TechSolutions LLC and \
             Global Retail Inc. worth $250,000. It renews automatically unless cancelled 60 days \
             before expiry, can be terminated with 30 days notice, and is governed by California law."
        }
        ExtractionType::General => {
            "Q1 2024 business report showing $2.4M revenue (up 18%) and expansion into three new \
             markets. Key follow-ups are the Q2 budget and a regional sales hire."
        }
    }
}

/// 抽出種別に応じたデモ結果を生成
pub fn demo_result(kind: ExtractionType, filename: &str) -> ExtractionResult {
    let structured = match kind {
        ExtractionType::Invoice => invoice_data(),
        ExtractionType::Contract => contract_data(),
        ExtractionType::General => general_data(),
    };

    ExtractionResult::new(json!({
        "filename": filename,
        "extraction_type": kind.as_str(),
        "structured_data": structured,
        "raw_text": raw_text(kind),
        "ai_summary": summary(kind),
        "demo": true,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::SingleView;

    #[test]
    fn test_demo_result_is_marked() {
        for kind in ExtractionType::ALL {
            let result = demo_result(kind, "sample.pdf");
            assert!(result.is_demo());
            assert_eq!(result.filename(), Some("sample.pdf"));
            assert_eq!(result.field("extraction_type"), &json!(kind.as_str()));
        }
    }

    #[test]
    fn test_demo_result_matches_type() {
        let invoice = demo_result(ExtractionType::Invoice, "a.pdf");
        assert!(invoice.field("structured_data").get("invoice_number").is_some());

        let contract = demo_result(ExtractionType::Contract, "a.pdf");
        assert!(contract.field("structured_data").get("parties").is_some());

        let general = demo_result(ExtractionType::General, "a.pdf");
        assert!(general.field("structured_data").get("key_topics").is_some());
    }

    #[test]
    fn test_demo_result_renders() {
        let view = SingleView::from_result(&demo_result(ExtractionType::Contract, "c.pdf"));
        assert!(view.is_demo);
        assert!(view.structured_json.contains("\"governing_law\""));
        assert!(view.raw_text.starts_with("SOFTWARE DEVELOPMENT"));
        assert!(!view.ai_summary.is_empty());
    }
}
