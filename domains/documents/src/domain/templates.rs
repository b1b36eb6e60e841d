//! Plain-text templates for the supported document types
//!
//! Each template renders a complete document from a field map. Missing
//! fields render as bracketed placeholders so a partially-specified document
//! is still readable.

use serde_json::{Map, Value};

use super::entities::DocumentType;

/// Render the template for `document_type` with the given fields
pub fn render(document_type: DocumentType, fields: &Map<String, Value>) -> String {
    match document_type {
        DocumentType::Nda => render_nda(fields),
        DocumentType::DirectorAppointment => render_director_appointment(fields),
        DocumentType::EmploymentAgreement => render_employment_agreement(fields),
    }
}

/// Look up a field as display text, falling back to a placeholder
fn field_or(fields: &Map<String, Value>, key: &str, default: &str) -> String {
    match fields.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => default.to_string(),
        Some(other) => other.to_string(),
    }
}

fn render_nda(fields: &Map<String, Value>) -> String {
    let party1 = field_or(fields, "party1_name", "[PARTY 1 NAME]");
    let party2 = field_or(fields, "party2_name", "[PARTY 2 NAME]");
    let effective_date = field_or(fields, "effective_date", "[EFFECTIVE DATE]");
    let term_years = field_or(fields, "term_years", "2");

    format!(
        r#"NON-DISCLOSURE AGREEMENT

This Non-Disclosure Agreement ("Agreement") is entered into as of {effective_date} ("Effective Date")

BETWEEN:
{party1} ("Disclosing Party")

AND:
{party2} ("Receiving Party")

WHEREAS the Disclosing Party possesses certain confidential and proprietary information; and

WHEREAS the Receiving Party desires to receive such confidential information for legitimate business purposes;

NOW THEREFORE, in consideration of the mutual covenants and agreements contained herein, the parties agree as follows:

1. DEFINITION OF CONFIDENTIAL INFORMATION
"Confidential Information" means any and all technical and non-technical information disclosed by the Disclosing Party, including but not limited to: trade secrets, business strategies, customer lists, financial information, product designs, software, and any other proprietary information.

2. OBLIGATIONS OF RECEIVING PARTY
The Receiving Party agrees to:
a) Hold all Confidential Information in strict confidence
b) Not disclose Confidential Information to any third party without prior written consent
c) Use Confidential Information solely for the agreed business purpose
d) Protect Confidential Information with the same degree of care used for its own confidential information

3. TERM
This Agreement shall remain in effect for {term_years} years from the Effective Date. The obligations regarding Confidential Information shall survive termination for an additional {term_years} years.

4. RETURN OF MATERIALS
Upon termination or upon request, the Receiving Party shall return or destroy all Confidential Information and certify such destruction in writing.

5. NO LICENSE
Nothing in this Agreement grants any license or right to the Receiving Party regarding intellectual property of the Disclosing Party.

6. GOVERNING LAW
This Agreement shall be governed by the laws of the applicable jurisdiction.

IN WITNESS WHEREOF, the parties have executed this Agreement as of the Effective Date.

_________________________________
Disclosing Party: {party1}
Date: _______________

_________________________________
Receiving Party: {party2}
Date: _______________
"#
    )
}

fn render_director_appointment(fields: &Map<String, Value>) -> String {
    let name = field_or(fields, "director_name", "[DIRECTOR NAME]");
    let effective_date = field_or(fields, "effective_date", "[EFFECTIVE DATE]");
    let committees = field_or(fields, "committees", "");
    let resolution_number = field_or(fields, "resolution_number", "RES-2024-001");

    let committee_clause = if committees.is_empty() {
        format!("{name} is not assigned to any committees at this time.")
    } else {
        format!("{name} is appointed to the {committees}.")
    };

    format!(
        r#"BOARD RESOLUTION
APPOINTMENT OF DIRECTOR

Resolution Number: {resolution_number}
Date: {effective_date}

RESOLVED THAT:

1. APPOINTMENT
{name} is hereby appointed as a Director of the Company, effective {effective_date}.

2. AUTHORITY
The Director shall have all rights, powers, and responsibilities as set forth in the Company's Articles of Incorporation and Bylaws.

3. COMMITTEE ASSIGNMENTS
{committee_clause}

4. EFFECTIVE DATE
This resolution shall be effective as of {effective_date}.

5. CERTIFICATION
The undersigned Secretary certifies that the foregoing resolution was duly adopted by the Board of Directors and remains in full force and effect.

Executed this day: {effective_date}

_________________________________
Corporate Secretary

_________________________________
Board Chairperson
"#
    )
}

fn render_employment_agreement(fields: &Map<String, Value>) -> String {
    let employee_name = field_or(fields, "employee_name", "[EMPLOYEE NAME]");
    let company_name = field_or(fields, "company_name", "[COMPANY NAME]");
    let position = field_or(fields, "position", "[POSITION]");
    let start_date = field_or(fields, "start_date", "[START DATE]");
    let salary = field_or(fields, "salary", "[SALARY]");

    format!(
        r#"EMPLOYMENT AGREEMENT

This Employment Agreement ("Agreement") is entered into as of {start_date}

BETWEEN:
{company_name} ("Company")

AND:
{employee_name} ("Employee")

1. POSITION AND DUTIES
The Company hereby employs the Employee in the position of {position}. The Employee accepts such employment and agrees to perform all duties and responsibilities associated with this position.

2. COMPENSATION
The Company shall pay the Employee an annual salary of {salary}, payable in accordance with the Company's standard payroll practices.

3. START DATE
Employment shall commence on {start_date}.

4. EMPLOYMENT RELATIONSHIP
This is an at-will employment relationship. Either party may terminate this agreement at any time, with or without cause, with or without notice.

5. DUTIES AND RESPONSIBILITIES
The Employee shall:
a) Devote their full business time and attention to the performance of their duties
b) Comply with all Company policies and procedures
c) Act in the best interests of the Company at all times
d) Not engage in any competing business activities

6. CONFIDENTIALITY
The Employee acknowledges that during employment they will have access to confidential information and trade secrets of the Company. The Employee agrees to maintain strict confidentiality of all such information during and after employment.

7. BENEFITS
The Employee shall be eligible for benefits in accordance with Company policies, including but not limited to health insurance, paid time off, and retirement plans as applicable.

8. TERMINATION
Either party may terminate this Agreement with written notice. Upon termination, the Employee shall:
a) Return all Company property
b) Continue to maintain confidentiality obligations
c) Receive final compensation for work performed through the termination date

9. GOVERNING LAW
This Agreement shall be governed by the laws of the applicable jurisdiction.

IN WITNESS WHEREOF, the parties have executed this Agreement as of the date first written above.

_________________________________
Company Representative: {company_name}
Date: _______________

_________________________________
Employee: {employee_name}
Date: _______________
"#
    )
}
