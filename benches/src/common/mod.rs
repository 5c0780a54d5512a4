use txwatch::prelude::*;

/// Newline-free JSON payloads; every `suspicious_every`-th record is above the threshold
pub fn generate_payloads(count: usize, suspicious_every: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| {
            let amount = if suspicious_every > 0 && i % suspicious_every == 0 {
                SUSPICIOUS_AMOUNT + 1.0 + (i % 1000) as f64
            } else {
                (i % 9_000) as f64 + 0.5
            };
            format!(
                r#"{{"transaction_id":{},"account_number":{},"transaction_type":"withdrawal","transaction_amount":{:.2},"transaction_time":"2023-06-05T03:05:12-03:00","location":"Fort Worth, TX"}}"#,
                1_111_111_111 + i as i64,
                111_111_111 + (i % 5_000) as i64,
                amount
            )
            .into_bytes()
        })
        .collect()
}

/// Payloads joined into one newline-delimited buffer
pub fn generate_stream(count: usize, suspicious_every: usize) -> Vec<u8> {
    let mut buffer = Vec::new();
    for payload in generate_payloads(count, suspicious_every) {
        buffer.extend_from_slice(&payload);
        buffer.push(b'\n');
    }
    buffer
}
