use byteorder::{ByteOrder, LittleEndian};
use png2ico::{IconDir, PngImage, ProbeResult};
use proptest::prelude::*;

//===========================================================================//

fn png_fixture(
    width: u32,
    height: u32,
    bit_depth: u8,
    total_size: usize,
) -> PngImage {
    assert!(total_size >= 25);
    let mut data = Vec::with_capacity(total_size);
    data.extend_from_slice(&[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a,
                             0x0a]);
    data.extend_from_slice(&13u32.to_be_bytes());
    data.extend_from_slice(b"IHDR");
    data.extend_from_slice(&width.to_be_bytes());
    data.extend_from_slice(&height.to_be_bytes());
    data.push(bit_depth);
    while data.len() < total_size {
        data.push((data.len() % 251) as u8);
    }
    match PngImage::probe(data).unwrap() {
        ProbeResult::Png(image) => image,
        ProbeResult::NotPng(reason) => {
            panic!("fixture was rejected: {}", reason)
        }
    }
}

//===========================================================================//

#[test]
fn two_image_file_layout() {
    // Two 32x32 8-bit PNGs of 500 and 700 bytes: the payloads land at
    // offsets 38 and 538, and the whole file is 1238 bytes.
    let mut icondir = IconDir::new();
    icondir.add_image(png_fixture(32, 32, 8, 500));
    icondir.add_image(png_fixture(32, 32, 8, 700));
    let mut output = Vec::<u8>::new();
    icondir.write(&mut output).unwrap();
    let expected: &[u8] = b"\x00\x00\x01\x00\x02\x00\
        \x20\x20\x00\x00\x00\x00\x08\x00\
        \xf4\x01\x00\x00\x26\x00\x00\x00\
        \x20\x20\x00\x00\x00\x00\x08\x00\
        \xbc\x02\x00\x00\x1a\x02\x00\x00";
    assert_eq!(&output[..38], expected);
    assert_eq!(&output[38..538], icondir.images()[0].data());
    assert_eq!(&output[538..], icondir.images()[1].data());
    assert_eq!(output.len(), 1238);
}

#[test]
fn payload_order_follows_insertion_order() {
    // A small image added after a large one stays second; the directory is
    // not resorted.
    let mut icondir = IconDir::new();
    icondir.add_image(png_fixture(256, 256, 32, 900));
    icondir.add_image(png_fixture(16, 16, 8, 60));
    let mut output = Vec::<u8>::new();
    icondir.write(&mut output).unwrap();
    let first_offset = LittleEndian::read_u32(&output[18..22]);
    let second_offset = LittleEndian::read_u32(&output[34..38]);
    assert_eq!(first_offset, 38);
    assert_eq!(second_offset, 938);
    assert_eq!(output[6], 0); // 256 px encodes as a zero byte
    assert_eq!(output[22], 16);
    // Reversing the insertion order moves the payload boundary.
    let mut reversed = IconDir::new();
    reversed.add_image(png_fixture(16, 16, 8, 60));
    reversed.add_image(png_fixture(256, 256, 32, 900));
    let mut output = Vec::<u8>::new();
    reversed.write(&mut output).unwrap();
    assert_eq!(LittleEndian::read_u32(&output[18..22]), 38);
    assert_eq!(LittleEndian::read_u32(&output[34..38]), 98);
}

#[test]
fn offsets_are_recomputed_for_the_final_collection() {
    // Writing is a pure function of the current collection: growing the
    // collection after a write shifts every offset on the next write.
    let mut icondir = IconDir::new();
    icondir.add_image(png_fixture(32, 32, 8, 100));
    let mut first = Vec::<u8>::new();
    icondir.write(&mut first).unwrap();
    assert_eq!(LittleEndian::read_u32(&first[18..22]), 22);
    icondir.add_image(png_fixture(64, 64, 8, 100));
    let mut second = Vec::<u8>::new();
    icondir.write(&mut second).unwrap();
    // One more entry in the directory pushes the first payload back.
    assert_eq!(LittleEndian::read_u32(&second[18..22]), 38);
    assert_eq!(LittleEndian::read_u32(&second[34..38]), 138);
    let mut again = Vec::<u8>::new();
    icondir.write(&mut again).unwrap();
    assert_eq!(second, again);
}

#[test]
fn payloads_are_embedded_verbatim() {
    let image = png_fixture(48, 48, 8, 333);
    let original = image.data().to_vec();
    let mut icondir = IconDir::new();
    icondir.add_image(image);
    let mut output = Vec::<u8>::new();
    icondir.write(&mut output).unwrap();
    assert_eq!(&output[22..], original.as_slice());
}

//===========================================================================//

proptest! {
    #[test]
    fn directory_layout_matches_collection(
        fixtures in prop::collection::vec(
            (1u32..=256, 1u32..=256, any::<u8>(), 25usize..200),
            0..12,
        )
    ) {
        let mut icondir = IconDir::new();
        for &(width, height, bit_depth, size) in fixtures.iter() {
            icondir.add_image(png_fixture(width, height, bit_depth, size));
        }
        let mut output = Vec::<u8>::new();
        icondir.write(&mut output).unwrap();
        let count = fixtures.len();
        prop_assert_eq!(&output[..4], b"\x00\x00\x01\x00");
        prop_assert_eq!(
            LittleEndian::read_u16(&output[4..6]) as usize,
            count
        );
        let mut expected_offset = (6 + 16 * count) as u32;
        for (index, &(width, height, bit_depth, size)) in
            fixtures.iter().enumerate()
        {
            let entry = &output[6 + 16 * index..6 + 16 * (index + 1)];
            let width_byte = if width > 255 { 0 } else { width as u8 };
            let height_byte = if height > 255 { 0 } else { height as u8 };
            prop_assert_eq!(entry[0], width_byte);
            prop_assert_eq!(entry[1], height_byte);
            prop_assert_eq!(entry[2], 0); // no color palette
            prop_assert_eq!(entry[3], 0); // reserved
            prop_assert_eq!(LittleEndian::read_u16(&entry[4..6]), 0);
            prop_assert_eq!(
                LittleEndian::read_u16(&entry[6..8]),
                bit_depth as u16
            );
            prop_assert_eq!(
                LittleEndian::read_u32(&entry[8..12]) as usize,
                size
            );
            prop_assert_eq!(
                LittleEndian::read_u32(&entry[12..16]),
                expected_offset
            );
            let start = expected_offset as usize;
            prop_assert_eq!(
                &output[start..start + size],
                icondir.images()[index].data()
            );
            expected_offset += size as u32;
        }
        prop_assert_eq!(output.len(), expected_offset as usize);
    }
}

//===========================================================================//
