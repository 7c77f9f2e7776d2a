//! Escaping and validation for values spliced into SOQL, URLs and SOAP.
//!
//! Every lookup in this workspace that filters on a caller-supplied value
//! (`get_by_name`, `get_by_domain`, `get_cases`, ...) goes through
//! [`soql::escape_string`] before the value lands inside a quoted literal.
//!
//! ```rust
//! use sfquerier_client::security::soql;
//!
//! let website = soql::escape_string("o'reilly.com");
//! let query = format!("SELECT Id FROM Account WHERE Website='{}'", website);
//! assert_eq!(query, "SELECT Id FROM Account WHERE Website='o\\'reilly.com'");
//! ```

/// SOQL escaping utilities.
pub mod soql {
    /// Escape a string value for use inside a quoted SOQL literal.
    ///
    /// Escapes `'`, `\`, newline, carriage return and tab.
    ///
    /// ```rust
    /// use sfquerier_client::security::soql;
    ///
    /// assert_eq!(soql::escape_string("O'Brien & Co."), "O\\'Brien & Co.");
    /// ```
    #[must_use]
    pub fn escape_string(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 8);
        for ch in value.chars() {
            match ch {
                '\'' => escaped.push_str("\\'"),
                '\\' => escaped.push_str("\\\\"),
                '\n' => escaped.push_str("\\n"),
                '\r' => escaped.push_str("\\r"),
                '\t' => escaped.push_str("\\t"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }

    /// Field and sObject names: a letter, then letters, digits or `_`.
    ///
    /// ```rust
    /// use sfquerier_client::security::soql;
    ///
    /// assert!(soql::is_safe_field_name("CaseNumber"));
    /// assert!(soql::is_safe_field_name("Region__c"));
    /// assert!(!soql::is_safe_field_name("Name'; DELETE"));
    /// ```
    #[must_use]
    pub fn is_safe_field_name(name: &str) -> bool {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) if first.is_ascii_alphabetic() => {
                chars.all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
            }
            _ => false,
        }
    }

    /// Validate that an sObject name is safe to put in a URL path or FROM clause.
    #[must_use]
    pub fn is_safe_sobject_name(name: &str) -> bool {
        is_safe_field_name(name)
    }
}

/// URL path utilities.
pub mod url {
    /// URL-encode a path segment or parameter value.
    ///
    /// ```rust
    /// use sfquerier_client::security::url;
    ///
    /// assert_eq!(url::encode_param("001/../../secret"), "001%2F..%2F..%2Fsecret");
    /// ```
    #[must_use]
    pub fn encode_param(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }

    /// Salesforce record ids are 15 or 18 ASCII alphanumerics.
    ///
    /// ```rust
    /// use sfquerier_client::security::url;
    ///
    /// assert!(url::is_valid_salesforce_id("001000000000001"));
    /// assert!(url::is_valid_salesforce_id("001000000000001AAA"));
    /// assert!(!url::is_valid_salesforce_id("001/../../etc"));
    /// ```
    #[must_use]
    pub fn is_valid_salesforce_id(id: &str) -> bool {
        let len = id.len();
        (len == 15 || len == 18) && id.chars().all(|c| c.is_ascii_alphanumeric())
    }

    /// `sobjects/{sobject}/{id}`, or `None` if either part fails validation.
    #[must_use]
    pub fn sobject_path(sobject: &str, id: &str) -> Option<String> {
        if !super::soql::is_safe_sobject_name(sobject) || !is_valid_salesforce_id(id) {
            return None;
        }
        Some(format!("sobjects/{}/{}", sobject, id))
    }
}

/// XML escaping for the SOAP login envelope.
pub mod xml {
    /// Escape the five predefined XML entities.
    ///
    /// ```rust
    /// use sfquerier_client::security::xml;
    ///
    /// assert_eq!(xml::escape("p<ss>&'\""), "p&lt;ss&gt;&amp;&apos;&quot;");
    /// ```
    #[must_use]
    pub fn escape(value: &str) -> String {
        let mut escaped = String::with_capacity(value.len() + 16);
        for ch in value.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&apos;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }
}
