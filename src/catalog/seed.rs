// src/catalog/seed.rs - Products shipped with the store

use super::{Category, Product};
use crate::types::ProductId;

struct SeedProduct {
    id: ProductId,
    name: &'static str,
    category: Category,
    price: u64,
    original: Option<(u64, &'static str)>,
    image: &'static str,
    fallback: Option<&'static str>,
    description: &'static str,
    rating: f64,
    reviews: u64,
}

impl From<SeedProduct> for Product {
    fn from(seed: SeedProduct) -> Self {
        Product {
            id: seed.id,
            name: seed.name.to_string(),
            category: seed.category,
            price: seed.price,
            original_price: seed.original.map(|(price, _)| price),
            discount: seed.original.map(|(_, label)| label.to_string()),
            image: seed.image.to_string(),
            fallback_image: seed.fallback.map(str::to_string),
            description: seed.description.to_string(),
            rating: seed.rating,
            reviews: seed.reviews,
        }
    }
}

pub(super) fn products() -> Vec<Product> {
    vec![
        SeedProduct {
            id: 1,
            name: "Apple iPhone 15 Pro Max",
            category: Category::Mobiles,
            price: 159900,
            original: Some((169900, "6%")),
            image: "https://images.unsplash.com/photo-1592750475338-74b7b21085ab?w=312&h=312&fit=crop&crop=center",
            fallback: Some("https://via.placeholder.com/312x312/667eea/ffffff?text=iPhone+15+Pro+Max"),
            description: "6.7-inch Super Retina XDR display, A17 Pro chip, 48MP camera system",
            rating: 4.8,
            reviews: 14583,
        },
        SeedProduct {
            id: 2,
            name: "Samsung Galaxy S24 Ultra",
            category: Category::Mobiles,
            price: 124999,
            original: Some((129999, "4%")),
            image: "https://images.unsplash.com/photo-1610945265064-0e34e5519bbf?w=312&h=312&fit=crop&crop=center",
            fallback: Some("https://via.placeholder.com/312x312/667eea/ffffff?text=Galaxy+S24+Ultra"),
            description: "200MP camera, S Pen included, 6.8-inch Dynamic AMOLED display",
            rating: 4.7,
            reviews: 12061,
        },
        SeedProduct {
            id: 9,
            name: "Google Pixel 8 Pro",
            category: Category::Mobiles,
            price: 89999,
            original: Some((99999, "10%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Google_Pixel_8_Pro.jpg",
            fallback: Some("https://via.placeholder.com/500x300/1a73e8/ffffff?text=Pixel+8+Pro"),
            description: "Pro-grade camera, Tensor G3, smooth 120Hz display",
            rating: 4.6,
            reviews: 6750,
        },
        SeedProduct {
            id: 3,
            name: "Apple MacBook Air M2",
            category: Category::Laptops,
            price: 119900,
            original: None,
            image: "https://images.unsplash.com/photo-1517336714731-489689fd1ca8?w=312&h=312&fit=crop&crop=center",
            fallback: None,
            description: "13.6-inch Liquid Retina, M2 chip, lightweight and powerful",
            rating: 4.6,
            reviews: 8745,
        },
        SeedProduct {
            id: 4,
            name: "HP Pavilion 15",
            category: Category::Laptops,
            price: 78999,
            original: None,
            image: "https://images.unsplash.com/photo-1519389950473-47ba0277781c?w=312&h=312&fit=crop&crop=center",
            fallback: None,
            description: "15.6-inch FHD, Intel Core i5, 16GB RAM, 512GB SSD. Popular for students",
            rating: 4.5,
            reviews: 6328,
        },
        SeedProduct {
            id: 10,
            name: "Dell XPS 13",
            category: Category::Laptops,
            price: 129999,
            original: None,
            image: "https://images.unsplash.com/photo-1498050108023-c5249f4df085?w=312&h=312&fit=crop&crop=center",
            fallback: None,
            description: "13.4-inch FHD+ InfinityEdge, Intel i7, 16GB RAM, sleek design",
            rating: 4.7,
            reviews: 5032,
        },
        SeedProduct {
            id: 7,
            name: "Levi's Men Slim Jeans",
            category: Category::Fashion,
            price: 2799,
            original: Some((3999, "30%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Levi%27s_501_raw_jeans.jpg",
            fallback: Some("https://via.placeholder.com/500x300/1e3a8a/ffffff?text=Levi%27s+Jeans"),
            description: "High-quality denim, ideal fit, stylish look. Flipkart's top-trending fashion",
            rating: 4.3,
            reviews: 3089,
        },
        SeedProduct {
            id: 11,
            name: "Nike Air Max 270",
            category: Category::Fashion,
            price: 8999,
            original: Some((12999, "30%")),
            image: "https://images.unsplash.com/photo-1542291026-7eec264c27ff?w=312&h=312&fit=crop&crop=center",
            fallback: Some("https://via.placeholder.com/312x312/667eea/ffffff?text=Nike+Air+Max+270"),
            description: "Comfortable running shoes with iconic Air Max cushioning",
            rating: 4.4,
            reviews: 2398,
        },
        SeedProduct {
            id: 6,
            name: "Prestige Electric Kettle 1.5L",
            category: Category::HomeKitchen,
            price: 1699,
            original: Some((2495, "32%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Electric_kettle.jpg",
            fallback: Some("https://via.placeholder.com/500x300/c41e3a/ffffff?text=Electric+Kettle"),
            description: "Stainless steel, auto shut-off, easy pour",
            rating: 4.4,
            reviews: 5102,
        },
        SeedProduct {
            id: 12,
            name: "Instant Pot Duo Evo Plus",
            category: Category::HomeKitchen,
            price: 12999,
            original: Some((15499, "16%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Instant_Pot_DUO60_pressure_cooker.jpg",
            fallback: Some("https://via.placeholder.com/500x300/8b0000/ffffff?text=Instant+Pot"),
            description: "9-in-1 electric pressure cooker, perfect for quick meals",
            rating: 4.5,
            reviews: 3894,
        },
        SeedProduct {
            id: 5,
            name: "Sony WH-1000XM5 Headphones",
            category: Category::Electronics,
            price: 29990,
            original: Some((34990, "14%")),
            image: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=312&h=312&fit=crop&crop=center",
            fallback: Some("https://via.placeholder.com/312x312/667eea/ffffff?text=Sony+Headphones"),
            description: "Industry-leading noise cancellation, 30hr battery. Bestseller on Amazon",
            rating: 4.7,
            reviews: 9182,
        },
        SeedProduct {
            id: 13,
            name: "Samsung Galaxy Watch 6",
            category: Category::Electronics,
            price: 24999,
            original: Some((27999, "11%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Samsung_Galaxy_Watch_6_Classic_01.jpg",
            fallback: Some("https://via.placeholder.com/500x300/1565c0/ffffff?text=Galaxy+Watch+6"),
            description: "Smartwatch with health tracking, GPS, and AMOLED display",
            rating: 4.6,
            reviews: 5175,
        },
        SeedProduct {
            id: 8,
            name: "Lakmé Absolute Perfect Radiance Serum",
            category: Category::Beauty,
            price: 599,
            original: Some((999, "40%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Lakm%C3%A9_logo.jpg",
            fallback: Some("https://via.placeholder.com/500x300/ff69b4/ffffff?text=Lakme+Serum"),
            description: "Brightening formula, daily use, dermatologist-tested",
            rating: 4.5,
            reviews: 2348,
        },
        SeedProduct {
            id: 14,
            name: "Philips Beard Trimmer Series 7000",
            category: Category::Beauty,
            price: 3499,
            original: Some((4499, "22%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Hair_Clipper_-_Wahl_(51013604297).jpg",
            fallback: Some("https://via.placeholder.com/500x300/0f4c75/ffffff?text=Beard+Trimmer"),
            description: "Advanced trimmer with skin protection technology",
            rating: 4.3,
            reviews: 1570,
        },
        SeedProduct {
            id: 15,
            name: "OnePlus Nord 2 5G",
            category: Category::Mobiles,
            price: 27999,
            original: Some((32999, "15%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Oneplus_Nord_2.jpg",
            fallback: Some("https://via.placeholder.com/500x300/2563eb/ffffff?text=OnePlus+Nord+2"),
            description: "Dimensity performance, 90Hz AMOLED, fast charging",
            rating: 4.4,
            reviews: 2103,
        },
        SeedProduct {
            id: 16,
            name: "ASUS ROG Strix G15",
            category: Category::Laptops,
            price: 129990,
            original: Some((139990, "7%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/ASUS_ROG_Strix_G15_(G513QY-HQ012T)-top_keyboard_touchpad_PNr%C2%B00889.jpg",
            fallback: Some("https://via.placeholder.com/500x300/111827/ffffff?text=ROG+Strix+G15"),
            description: "Ryzen CPU, dedicated GPU, RGB keyboard for gamers",
            rating: 4.6,
            reviews: 2137,
        },
        SeedProduct {
            id: 17,
            name: "Canon EOS R50 Mirrorless",
            category: Category::Electronics,
            price: 61990,
            original: Some((67990, "9%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Canon_EOS_R50_(52694437103).jpg",
            fallback: Some("https://via.placeholder.com/500x300/0ea5e9/ffffff?text=Canon+EOS+R50"),
            description: "APS‑C mirrorless with 4K video and fast autofocus",
            rating: 4.7,
            reviews: 987,
        },
        SeedProduct {
            id: 18,
            name: "Bose SoundLink Flex",
            category: Category::Electronics,
            price: 15990,
            original: Some((17990, "11%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Bose_SoundLink_Flex_Bluetooth%C2%AE_Speaker_(white).jpeg",
            fallback: Some("https://via.placeholder.com/500x300/059669/ffffff?text=Bose+SoundLink+Flex"),
            description: "Portable Bluetooth speaker with IP67 and rich bass",
            rating: 4.5,
            reviews: 4210,
        },
        SeedProduct {
            id: 19,
            name: "Air Fryer 4.2L",
            category: Category::HomeKitchen,
            price: 7999,
            original: Some((10499, "24%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/Air_Fryer_5458.jpg",
            fallback: Some("https://via.placeholder.com/500x300/ea580c/ffffff?text=Air+Fryer+4.2L"),
            description: "Crispy results with little to no oil, easy to clean",
            rating: 4.4,
            reviews: 1788,
        },
        SeedProduct {
            id: 20,
            name: "Ray‑Ban Aviator Sunglasses",
            category: Category::Fashion,
            price: 6499,
            original: Some((7990, "19%")),
            image: "https://commons.wikimedia.org/wiki/Special:FilePath/RayBanAviator.jpg",
            fallback: Some("https://via.placeholder.com/500x300/1f2937/ffffff?text=Ray‑Ban+Aviator"),
            description: "Iconic metal frame with UV‑protective lenses",
            rating: 4.6,
            reviews: 3650,
        },
    ]
    .into_iter()
    .map(Product::from)
    .collect()
}
