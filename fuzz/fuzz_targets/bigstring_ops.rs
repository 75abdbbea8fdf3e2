#![no_main]

use bigstring::{Bigstring, compare};
use bigstring_error::BigstringError;
use bigstring_fuzz::{Action, ExpectedValue, FuzzBigstringAction};
use libfuzzer_sys::{Corpus, fuzz_target};

fuzz_target!(|fuzz_action: FuzzBigstringAction| -> Corpus {
    let FuzzBigstringAction { initial, actions } = fuzz_action;
    let mut region = Bigstring::from(initial);
    for (i, (action, expected)) in actions.into_iter().enumerate() {
        let actual = apply(&mut region, &action);
        assert_eq!(actual, expected, "action {i} ({action:?}) diverged from the model");
    }
    Corpus::Keep
});

fn apply(region: &mut Bigstring<'static>, action: &Action) -> ExpectedValue {
    let result = match action {
        Action::CopyWithin { src, dst } => region
            .copy_within(*src, *dst)
            .map(|()| ExpectedValue::Region(region.to_vec())),
        Action::BlitFromBytes {
            bytes,
            src_offset,
            dst,
        } => region
            .blit_from_bytes(bytes, *src_offset, dst.offset, dst.len)
            .map(|()| ExpectedValue::Region(region.to_vec())),
        Action::BlitToBytes {
            src,
            dst_len,
            dst_offset,
        } => {
            let mut out = vec![0u8; *dst_len];
            region
                .blit_to_bytes(src.offset, &mut out, *dst_offset, src.len)
                .map(|()| ExpectedValue::Sequence(out))
        }
        Action::Compare { lhs, rhs } => region.view(*lhs).and_then(|lhs| {
            let rhs = region.view(*rhs)?;
            compare(&lhs, &rhs).map(ExpectedValue::Ordering)
        }),
        Action::SetU32Le { offset, value } => region
            .set_u32_le(*offset, *value)
            .map(|()| ExpectedValue::Region(region.to_vec())),
    };
    result.unwrap_or_else(|err| match err {
        BigstringError::OutOfBounds(..) => ExpectedValue::OutOfBounds,
        BigstringError::LengthMismatch(..) => ExpectedValue::LengthMismatch,
        other => panic!("unexpected error {other}"),
    })
}
