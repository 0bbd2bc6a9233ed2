//! Fixed lookup tables for the local heuristics
//!
//! Sector weights, market data, trend data, representative companies and
//! keyword sets. The constants are empirical; they are reproduced as-is and
//! must not be tuned without updating the scenario tests.

use super::types::{Competitor, ImpactLevel, MarketAnalysis, Sector, UrgencyAnalysis};

/// Market figures for a sector.
#[derive(Debug, Clone, Copy)]
pub struct MarketData {
    pub companies_count: u64,
    pub growth_pct: f64,
    pub investment_volume: &'static str,
    pub avg_company_value: &'static str,
    /// Share of the market already served, in [0, 1]
    pub saturation: f64,
}

/// Trend figures for a sector, before impact adjustment.
#[derive(Debug, Clone, Copy)]
pub struct TrendData {
    pub trend: &'static str,
    pub growth_rate: &'static str,
    /// Index into [`RISK_LADDER`]
    pub risk: usize,
    /// Index into [`TIME_TO_MARKET_LADDER`]
    pub time_to_market: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct CompanyData {
    pub name: &'static str,
    pub innovation_index: u8,
    pub description: &'static str,
    pub founded: &'static str,
    pub hq: &'static str,
    pub market_cap: &'static str,
    pub employees: &'static str,
    pub revenue: &'static str,
    pub key_products: &'static [&'static str],
}

/// Everything the heuristics know about a sector.
#[derive(Debug, Clone, Copy)]
pub struct SectorProfile {
    /// Added to the base potential score
    pub weight: i32,
    pub competition: &'static str,
    /// Multiplier applied to the raw classification score
    pub classification_multiplier: f64,
    pub market: MarketData,
    pub trend: TrendData,
    pub companies: &'static [CompanyData],
}

pub const RISK_LADDER: [&str; 4] = ["Bajo", "Medio", "Alto", "Muy Alto"];

pub const TIME_TO_MARKET_LADDER: [&str; 5] = [
    "3-6 meses",
    "6-12 meses",
    "12-18 meses",
    "18-24 meses",
    "24-36 meses",
];

/// Multiplier for sectors without an explicit classification entry.
pub const DEFAULT_CLASSIFICATION_MULTIPLIER: f64 = 0.6;

// ---------------------------------------------------------------------------
// Keyword sets (folded: lower-case, no accents)
// ---------------------------------------------------------------------------

pub const INNOVATION_TERMS: &[&str] = &[
    "inteligencia artificial",
    "machine learning",
    "aprendizaje automatico",
    "blockchain",
    "automatizacion",
    "innovador",
    "innovacion",
    "digital",
    "plataforma",
    "internet de las cosas",
    "iot",
    "realidad virtual",
    "realidad aumentada",
    "big data",
    "robotica",
    "sostenible",
    "en la nube",
    "biotecnologia",
];

pub const PROBLEM_TERMS: &[&str] = &[
    "problema",
    "necesidad",
    "dificultad",
    "falta de",
    "solucion",
    "mejorar",
    "ineficiente",
    "costoso",
    "frustracion",
    "perdida",
];

pub const MARKET_TERMS: &[&str] = &[
    "mercado",
    "clientes",
    "usuarios",
    "demanda",
    "consumidores",
    "crecimiento",
];

pub const CRITICAL_TERMS: &[&str] = &[
    "critico",
    "emergencia",
    "urgente",
    "grave",
    "peligro",
    "vital",
    "crisis",
    "colapso",
    "mortal",
    "riesgo de vida",
];

pub const RELEVANT_TERMS: &[&str] = &[
    "importante",
    "significativo",
    "necesario",
    "eficiencia",
    "oportunidad",
    "mejorar",
    "demanda",
    "frecuente",
];

pub const NON_RELEVANT_TERMS: &[&str] = &[
    "menor",
    "pequeno",
    "pequeño",
    "trivial",
    "cosmetico",
    "opcional",
    "leve",
    "insignificante",
    "ocasional",
];

pub const URGENCY_TERMS: &[&str] = &[
    "urgente",
    "inmediato",
    "emergencia",
    "crisis",
    "cuanto antes",
    "sin demora",
];

/// Scope words and their multipliers, checked widest scope first.
pub const SCALE_TIERS: &[(&[&str], f64)] = &[
    (&["global", "mundial", "millones"], 1.5),
    (&["nacional", "miles"], 1.3),
    (&["regional", "cientos"], 1.1),
    (&["local", "pocos"], 0.8),
];

pub const EXISTING_TECH_TERMS: &[&str] = &[
    "app",
    "aplicacion",
    "plataforma",
    "pagina web",
    "sitio web",
    "software",
    "marketplace",
    "automatizar",
    "digitalizar",
    "base de datos",
];

pub const ADVANCED_TECH_TERMS: &[&str] = &[
    "investigacion",
    "cuantic",
    "fusion nuclear",
    "edicion genetica",
    "nanotecnologia",
    "neurotecnologia",
    "biotecnologia",
    "avanzad",
    "desarrollo cientifico",
];

pub const IMPOSSIBLE_TERMS: &[&str] = &[
    "imposible",
    "teletransport",
    "viaje en el tiempo",
    "viajar en el tiempo",
    "inmortalidad",
    "movimiento perpetuo",
    "energia infinita",
];

// ---------------------------------------------------------------------------
// Sector profiles
// ---------------------------------------------------------------------------

const TECNOLOGIA: SectorProfile = SectorProfile {
    weight: 12,
    competition: "Alta",
    classification_multiplier: 1.2,
    market: MarketData {
        companies_count: 45_000,
        growth_pct: 12.5,
        investment_volume: "$4.5T",
        avg_company_value: "$850M",
        saturation: 0.35,
    },
    trend: TrendData {
        trend: "Alto crecimiento",
        growth_rate: "12.5% anual",
        risk: 2,
        time_to_market: 1,
    },
    companies: &[
        CompanyData {
            name: "Microsoft",
            innovation_index: 92,
            description: "Software, nube e inteligencia artificial empresarial",
            founded: "1975",
            hq: "Redmond, EE. UU.",
            market_cap: "$3.1T",
            employees: "221,000",
            revenue: "$245B",
            key_products: &["Azure", "Microsoft 365", "Copilot"],
        },
        CompanyData {
            name: "Google",
            innovation_index: 94,
            description: "Búsqueda, publicidad digital y servicios en la nube",
            founded: "1998",
            hq: "Mountain View, EE. UU.",
            market_cap: "$2.1T",
            employees: "182,000",
            revenue: "$307B",
            key_products: &["Search", "Google Cloud", "Gemini"],
        },
        CompanyData {
            name: "Salesforce",
            innovation_index: 85,
            description: "Software de gestión de clientes en la nube",
            founded: "1999",
            hq: "San Francisco, EE. UU.",
            market_cap: "$260B",
            employees: "72,000",
            revenue: "$35B",
            key_products: &["Sales Cloud", "Service Cloud", "Slack"],
        },
        CompanyData {
            name: "Globant",
            innovation_index: 78,
            description: "Servicios de ingeniería de software y transformación digital",
            founded: "2003",
            hq: "Buenos Aires, Argentina",
            market_cap: "$9B",
            employees: "29,000",
            revenue: "$2.1B",
            key_products: &["Studios", "AI Pods"],
        },
    ],
};

const SALUD: SectorProfile = SectorProfile {
    weight: 10,
    competition: "Media-Alta",
    classification_multiplier: 1.3,
    market: MarketData {
        companies_count: 28_000,
        growth_pct: 9.8,
        investment_volume: "$1.2T",
        avg_company_value: "$420M",
        saturation: 0.30,
    },
    trend: TrendData {
        trend: "Alto crecimiento",
        growth_rate: "9.8% anual",
        risk: 1,
        time_to_market: 3,
    },
    companies: &[
        CompanyData {
            name: "Teladoc Health",
            innovation_index: 82,
            description: "Telemedicina y atención virtual",
            founded: "2002",
            hq: "Purchase, EE. UU.",
            market_cap: "$2B",
            employees: "5,600",
            revenue: "$2.6B",
            key_products: &["Consultas virtuales", "BetterHelp"],
        },
        CompanyData {
            name: "Philips Healthcare",
            innovation_index: 80,
            description: "Equipamiento médico y monitorización de pacientes",
            founded: "1891",
            hq: "Ámsterdam, Países Bajos",
            market_cap: "$25B",
            employees: "70,000",
            revenue: "$19B",
            key_products: &["Monitorización", "Imagen diagnóstica"],
        },
        CompanyData {
            name: "Doctoralia",
            innovation_index: 74,
            description: "Reserva de citas médicas y gestión de consultas",
            founded: "2007",
            hq: "Barcelona, España",
            market_cap: "Privada",
            employees: "3,000",
            revenue: "$250M",
            key_products: &["Agenda online", "Perfil profesional"],
        },
    ],
};

const EDUCACION: SectorProfile = SectorProfile {
    weight: 8,
    competition: "Media",
    classification_multiplier: 1.1,
    market: MarketData {
        companies_count: 15_000,
        growth_pct: 8.5,
        investment_volume: "$350B",
        avg_company_value: "$120M",
        saturation: 0.25,
    },
    trend: TrendData {
        trend: "Crecimiento sostenido",
        growth_rate: "8.5% anual",
        risk: 1,
        time_to_market: 2,
    },
    companies: &[
        CompanyData {
            name: "Coursera",
            innovation_index: 81,
            description: "Cursos en línea con universidades y empresas",
            founded: "2012",
            hq: "Mountain View, EE. UU.",
            market_cap: "$1.5B",
            employees: "1,200",
            revenue: "$690M",
            key_products: &["Cursos", "Certificados profesionales"],
        },
        CompanyData {
            name: "Duolingo",
            innovation_index: 88,
            description: "Aprendizaje de idiomas gamificado",
            founded: "2011",
            hq: "Pittsburgh, EE. UU.",
            market_cap: "$14B",
            employees: "800",
            revenue: "$750M",
            key_products: &["Duolingo", "Duolingo English Test"],
        },
        CompanyData {
            name: "Platzi",
            innovation_index: 72,
            description: "Formación profesional en tecnología para Latinoamérica",
            founded: "2011",
            hq: "Bogotá, Colombia",
            market_cap: "Privada",
            employees: "500",
            revenue: "$60M",
            key_products: &["Rutas de aprendizaje", "Platzi Business"],
        },
    ],
};

const FINANZAS: SectorProfile = SectorProfile {
    weight: 9,
    competition: "Muy Alta",
    classification_multiplier: 1.0,
    market: MarketData {
        companies_count: 22_000,
        growth_pct: 7.2,
        investment_volume: "$2.8T",
        avg_company_value: "$1.1B",
        saturation: 0.55,
    },
    trend: TrendData {
        trend: "Crecimiento moderado",
        growth_rate: "7.2% anual",
        risk: 2,
        time_to_market: 2,
    },
    companies: &[
        CompanyData {
            name: "Nubank",
            innovation_index: 87,
            description: "Banco digital sin comisiones",
            founded: "2013",
            hq: "São Paulo, Brasil",
            market_cap: "$60B",
            employees: "8,000",
            revenue: "$8B",
            key_products: &["Tarjeta de crédito", "Cuenta digital"],
        },
        CompanyData {
            name: "Stripe",
            innovation_index: 90,
            description: "Infraestructura de pagos en línea",
            founded: "2010",
            hq: "San Francisco, EE. UU.",
            market_cap: "$70B",
            employees: "8,000",
            revenue: "$16B",
            key_products: &["Payments", "Billing", "Connect"],
        },
        CompanyData {
            name: "Mercado Pago",
            innovation_index: 84,
            description: "Pagos y crédito digital en Latinoamérica",
            founded: "2003",
            hq: "Buenos Aires, Argentina",
            market_cap: "Parte de MercadoLibre",
            employees: "15,000",
            revenue: "$6B",
            key_products: &["Billetera", "Point", "Créditos"],
        },
    ],
};

const COMERCIO: SectorProfile = SectorProfile {
    weight: 5,
    competition: "Muy Alta",
    classification_multiplier: 0.8,
    market: MarketData {
        companies_count: 60_000,
        growth_pct: 6.5,
        investment_volume: "$900B",
        avg_company_value: "$95M",
        saturation: 0.65,
    },
    trend: TrendData {
        trend: "Crecimiento moderado",
        growth_rate: "6.5% anual",
        risk: 1,
        time_to_market: 1,
    },
    companies: &[
        CompanyData {
            name: "Amazon",
            innovation_index: 91,
            description: "Comercio electrónico y logística",
            founded: "1994",
            hq: "Seattle, EE. UU.",
            market_cap: "$1.9T",
            employees: "1,500,000",
            revenue: "$575B",
            key_products: &["Marketplace", "Prime", "Fulfillment"],
        },
        CompanyData {
            name: "MercadoLibre",
            innovation_index: 86,
            description: "Marketplace líder en Latinoamérica",
            founded: "1999",
            hq: "Montevideo, Uruguay",
            market_cap: "$95B",
            employees: "58,000",
            revenue: "$14B",
            key_products: &["Marketplace", "Mercado Envíos"],
        },
        CompanyData {
            name: "Shopify",
            innovation_index: 85,
            description: "Plataforma para tiendas en línea",
            founded: "2006",
            hq: "Ottawa, Canadá",
            market_cap: "$100B",
            employees: "8,300",
            revenue: "$7B",
            key_products: &["Shopify Plus", "Shop Pay"],
        },
    ],
};

const ALIMENTACION: SectorProfile = SectorProfile {
    weight: 6,
    competition: "Alta",
    classification_multiplier: 0.9,
    market: MarketData {
        companies_count: 38_000,
        growth_pct: 5.8,
        investment_volume: "$700B",
        avg_company_value: "$150M",
        saturation: 0.55,
    },
    trend: TrendData {
        trend: "Estable",
        growth_rate: "5.8% anual",
        risk: 0,
        time_to_market: 2,
    },
    companies: &[
        CompanyData {
            name: "Rappi",
            innovation_index: 79,
            description: "Entrega a domicilio de comida y supermercado",
            founded: "2015",
            hq: "Bogotá, Colombia",
            market_cap: "$5B",
            employees: "7,000",
            revenue: "$500M",
            key_products: &["Rappi Restaurantes", "Turbo"],
        },
        CompanyData {
            name: "Too Good To Go",
            innovation_index: 76,
            description: "Reducción del desperdicio alimentario",
            founded: "2016",
            hq: "Copenhague, Dinamarca",
            market_cap: "Privada",
            employees: "1,200",
            revenue: "$100M",
            key_products: &["Packs sorpresa"],
        },
        CompanyData {
            name: "NotCo",
            innovation_index: 83,
            description: "Alimentos de origen vegetal diseñados con IA",
            founded: "2015",
            hq: "Santiago, Chile",
            market_cap: "$1.5B",
            employees: "400",
            revenue: "$100M",
            key_products: &["NotMilk", "NotBurger"],
        },
    ],
};

const TRANSPORTE: SectorProfile = SectorProfile {
    weight: 7,
    competition: "Alta",
    classification_multiplier: 1.0,
    market: MarketData {
        companies_count: 18_000,
        growth_pct: 8.1,
        investment_volume: "$650B",
        avg_company_value: "$380M",
        saturation: 0.45,
    },
    trend: TrendData {
        trend: "Crecimiento sostenido",
        growth_rate: "8.1% anual",
        risk: 2,
        time_to_market: 3,
    },
    companies: &[
        CompanyData {
            name: "Uber",
            innovation_index: 84,
            description: "Movilidad bajo demanda y reparto",
            founded: "2009",
            hq: "San Francisco, EE. UU.",
            market_cap: "$150B",
            employees: "30,000",
            revenue: "$37B",
            key_products: &["Uber", "Uber Eats", "Uber Freight"],
        },
        CompanyData {
            name: "Cabify",
            innovation_index: 73,
            description: "Movilidad urbana para particulares y empresas",
            founded: "2011",
            hq: "Madrid, España",
            market_cap: "Privada",
            employees: "1,500",
            revenue: "$400M",
            key_products: &["Cabify", "Cabify Logistics"],
        },
        CompanyData {
            name: "BYD",
            innovation_index: 88,
            description: "Vehículos eléctricos y baterías",
            founded: "1995",
            hq: "Shenzhen, China",
            market_cap: "$110B",
            employees: "700,000",
            revenue: "$85B",
            key_products: &["Vehículos eléctricos", "Baterías Blade"],
        },
    ],
};

const ENERGIA: SectorProfile = SectorProfile {
    weight: 9,
    competition: "Media",
    classification_multiplier: 1.1,
    market: MarketData {
        companies_count: 12_000,
        growth_pct: 10.2,
        investment_volume: "$1.5T",
        avg_company_value: "$2.3B",
        saturation: 0.40,
    },
    trend: TrendData {
        trend: "Alto crecimiento",
        growth_rate: "10.2% anual",
        risk: 2,
        time_to_market: 4,
    },
    companies: &[
        CompanyData {
            name: "Iberdrola",
            innovation_index: 80,
            description: "Generación y distribución de energía renovable",
            founded: "1992",
            hq: "Bilbao, España",
            market_cap: "$85B",
            employees: "42,000",
            revenue: "$52B",
            key_products: &["Eólica", "Redes inteligentes"],
        },
        CompanyData {
            name: "Tesla Energy",
            innovation_index: 90,
            description: "Almacenamiento de energía y solar residencial",
            founded: "2015",
            hq: "Austin, EE. UU.",
            market_cap: "Parte de Tesla",
            employees: "5,000",
            revenue: "$10B",
            key_products: &["Powerwall", "Megapack"],
        },
        CompanyData {
            name: "Enphase Energy",
            innovation_index: 79,
            description: "Microinversores solares",
            founded: "2006",
            hq: "Fremont, EE. UU.",
            market_cap: "$15B",
            employees: "3,000",
            revenue: "$2.3B",
            key_products: &["IQ Microinverter", "IQ Battery"],
        },
    ],
};

const MEDIO_AMBIENTE: SectorProfile = SectorProfile {
    weight: 10,
    competition: "Baja",
    classification_multiplier: 1.2,
    market: MarketData {
        companies_count: 8_500,
        growth_pct: 11.3,
        investment_volume: "$480B",
        avg_company_value: "$210M",
        saturation: 0.20,
    },
    trend: TrendData {
        trend: "Alto crecimiento",
        growth_rate: "11.3% anual",
        risk: 1,
        time_to_market: 3,
    },
    companies: &[
        CompanyData {
            name: "Climeworks",
            innovation_index: 89,
            description: "Captura directa de CO2 del aire",
            founded: "2009",
            hq: "Zúrich, Suiza",
            market_cap: "Privada",
            employees: "500",
            revenue: "$30M",
            key_products: &["Orca", "Mammoth"],
        },
        CompanyData {
            name: "TOMRA",
            innovation_index: 81,
            description: "Clasificación y reciclaje automatizado",
            founded: "1972",
            hq: "Asker, Noruega",
            market_cap: "$5B",
            employees: "5,000",
            revenue: "$1.3B",
            key_products: &["Máquinas de retorno", "Clasificadores ópticos"],
        },
        CompanyData {
            name: "Algramo",
            innovation_index: 72,
            description: "Venta a granel con envases reutilizables",
            founded: "2013",
            hq: "Santiago, Chile",
            market_cap: "Privada",
            employees: "150",
            revenue: "$10M",
            key_products: &["Dispensadores inteligentes"],
        },
    ],
};

const ENTRETENIMIENTO: SectorProfile = SectorProfile {
    weight: 5,
    competition: "Muy Alta",
    classification_multiplier: 0.7,
    market: MarketData {
        companies_count: 30_000,
        growth_pct: 7.5,
        investment_volume: "$420B",
        avg_company_value: "$180M",
        saturation: 0.60,
    },
    trend: TrendData {
        trend: "Crecimiento moderado",
        growth_rate: "7.5% anual",
        risk: 2,
        time_to_market: 1,
    },
    companies: &[
        CompanyData {
            name: "Netflix",
            innovation_index: 86,
            description: "Streaming de series y películas",
            founded: "1997",
            hq: "Los Gatos, EE. UU.",
            market_cap: "$280B",
            employees: "13,000",
            revenue: "$39B",
            key_products: &["Netflix", "Netflix Games"],
        },
        CompanyData {
            name: "Spotify",
            innovation_index: 85,
            description: "Streaming de música y podcasts",
            founded: "2006",
            hq: "Estocolmo, Suecia",
            market_cap: "$90B",
            employees: "7,300",
            revenue: "$16B",
            key_products: &["Spotify Premium", "Podcasts"],
        },
        CompanyData {
            name: "Roblox",
            innovation_index: 82,
            description: "Plataforma de juegos creados por usuarios",
            founded: "2004",
            hq: "San Mateo, EE. UU.",
            market_cap: "$30B",
            employees: "2,400",
            revenue: "$3.5B",
            key_products: &["Roblox Studio"],
        },
    ],
};

const TURISMO: SectorProfile = SectorProfile {
    weight: 4,
    competition: "Alta",
    classification_multiplier: 0.7,
    market: MarketData {
        companies_count: 25_000,
        growth_pct: 6.0,
        investment_volume: "$310B",
        avg_company_value: "$85M",
        saturation: 0.50,
    },
    trend: TrendData {
        trend: "Recuperación",
        growth_rate: "6.0% anual",
        risk: 1,
        time_to_market: 1,
    },
    companies: &[
        CompanyData {
            name: "Airbnb",
            innovation_index: 84,
            description: "Alojamiento entre particulares y experiencias",
            founded: "2008",
            hq: "San Francisco, EE. UU.",
            market_cap: "$85B",
            employees: "6,900",
            revenue: "$11B",
            key_products: &["Alojamientos", "Experiencias"],
        },
        CompanyData {
            name: "Booking Holdings",
            innovation_index: 80,
            description: "Reservas de viajes en línea",
            founded: "1996",
            hq: "Norwalk, EE. UU.",
            market_cap: "$160B",
            employees: "24,000",
            revenue: "$23B",
            key_products: &["Booking.com", "Kayak"],
        },
        CompanyData {
            name: "Despegar",
            innovation_index: 70,
            description: "Agencia de viajes en línea para Latinoamérica",
            founded: "1999",
            hq: "Buenos Aires, Argentina",
            market_cap: "$1.7B",
            employees: "4,500",
            revenue: "$700M",
            key_products: &["Paquetes", "Vuelos"],
        },
    ],
};

const INMOBILIARIO: SectorProfile = SectorProfile {
    weight: 3,
    competition: "Alta",
    classification_multiplier: 0.8,
    market: MarketData {
        companies_count: 20_000,
        growth_pct: 4.5,
        investment_volume: "$1.1T",
        avg_company_value: "$260M",
        saturation: 0.60,
    },
    trend: TrendData {
        trend: "Estable",
        growth_rate: "4.5% anual",
        risk: 0,
        time_to_market: 3,
    },
    companies: &[
        CompanyData {
            name: "Idealista",
            innovation_index: 74,
            description: "Portal inmobiliario de compra y alquiler",
            founded: "2000",
            hq: "Madrid, España",
            market_cap: "$3B",
            employees: "1,000",
            revenue: "$200M",
            key_products: &["Portal", "Idealista Data"],
        },
        CompanyData {
            name: "Zillow",
            innovation_index: 77,
            description: "Marketplace inmobiliario y valoración automatizada",
            founded: "2006",
            hq: "Seattle, EE. UU.",
            market_cap: "$15B",
            employees: "6,000",
            revenue: "$2.2B",
            key_products: &["Zestimate", "Zillow Rentals"],
        },
        CompanyData {
            name: "QuintoAndar",
            innovation_index: 79,
            description: "Alquiler de vivienda sin garante",
            founded: "2012",
            hq: "São Paulo, Brasil",
            market_cap: "$5B",
            employees: "4,000",
            revenue: "$200M",
            key_products: &["Alquiler digital", "Compra asistida"],
        },
    ],
};

const AGRICULTURA: SectorProfile = SectorProfile {
    weight: 6,
    competition: "Media",
    classification_multiplier: 0.9,
    market: MarketData {
        companies_count: 16_000,
        growth_pct: 6.8,
        investment_volume: "$520B",
        avg_company_value: "$140M",
        saturation: 0.35,
    },
    trend: TrendData {
        trend: "Crecimiento sostenido",
        growth_rate: "6.8% anual",
        risk: 1,
        time_to_market: 3,
    },
    companies: &[
        CompanyData {
            name: "John Deere",
            innovation_index: 83,
            description: "Maquinaria agrícola y agricultura de precisión",
            founded: "1837",
            hq: "Moline, EE. UU.",
            market_cap: "$120B",
            employees: "83,000",
            revenue: "$61B",
            key_products: &["See & Spray", "Operations Center"],
        },
        CompanyData {
            name: "Indigo Ag",
            innovation_index: 78,
            description: "Tratamientos biológicos y créditos de carbono agrícolas",
            founded: "2014",
            hq: "Boston, EE. UU.",
            market_cap: "Privada",
            employees: "700",
            revenue: "$100M",
            key_products: &["Biotrinsic", "Carbon by Indigo"],
        },
        CompanyData {
            name: "Agrofy",
            innovation_index: 70,
            description: "Marketplace de insumos agropecuarios",
            founded: "2015",
            hq: "Buenos Aires, Argentina",
            market_cap: "Privada",
            employees: "300",
            revenue: "$30M",
            key_products: &["Marketplace", "Agrofy News"],
        },
    ],
};

const OTRO: SectorProfile = SectorProfile {
    weight: 0,
    competition: "Media",
    classification_multiplier: DEFAULT_CLASSIFICATION_MULTIPLIER,
    market: MarketData {
        companies_count: 10_000,
        growth_pct: 5.0,
        investment_volume: "$100B",
        avg_company_value: "$50M",
        saturation: 0.50,
    },
    trend: TrendData {
        trend: "Estable",
        growth_rate: "5.0% anual",
        risk: 1,
        time_to_market: 2,
    },
    companies: &[
        CompanyData {
            name: "Accenture",
            innovation_index: 78,
            description: "Consultoría y servicios profesionales",
            founded: "1989",
            hq: "Dublín, Irlanda",
            market_cap: "$220B",
            employees: "740,000",
            revenue: "$65B",
            key_products: &["Consultoría", "Outsourcing"],
        },
        CompanyData {
            name: "Deloitte",
            innovation_index: 75,
            description: "Auditoría, consultoría y asesoría",
            founded: "1845",
            hq: "Londres, Reino Unido",
            market_cap: "Privada",
            employees: "457,000",
            revenue: "$67B",
            key_products: &["Auditoría", "Consultoría"],
        },
        CompanyData {
            name: "Fiverr",
            innovation_index: 73,
            description: "Marketplace de servicios freelance",
            founded: "2010",
            hq: "Tel Aviv, Israel",
            market_cap: "$1B",
            employees: "800",
            revenue: "$380M",
            key_products: &["Fiverr Pro", "Fiverr Business"],
        },
    ],
};

/// Profile for a sector; `Otro` carries the defaults.
pub fn profile(sector: Sector) -> &'static SectorProfile {
    match sector {
        Sector::Tecnologia => &TECNOLOGIA,
        Sector::Salud => &SALUD,
        Sector::Educacion => &EDUCACION,
        Sector::Finanzas => &FINANZAS,
        Sector::Comercio => &COMERCIO,
        Sector::Alimentacion => &ALIMENTACION,
        Sector::Transporte => &TRANSPORTE,
        Sector::Energia => &ENERGIA,
        Sector::MedioAmbiente => &MEDIO_AMBIENTE,
        Sector::Entretenimiento => &ENTRETENIMIENTO,
        Sector::Turismo => &TURISMO,
        Sector::Inmobiliario => &INMOBILIARIO,
        Sector::Agricultura => &AGRICULTURA,
        Sector::Otro => &OTRO,
    }
}

/// Scale the clamped heuristic score by the sector's market potential.
///
/// `clamp(score * (growth / 10) * (1 - saturation) * 1.4, 35, 98)`
pub fn market_adjusted_score(score: f64, sector: Sector) -> u8 {
    let market = &profile(sector).market;
    let adjusted = score * (market.growth_pct / 10.0) * (1.0 - market.saturation) * 1.4;
    adjusted.clamp(35.0, 98.0).round() as u8
}

pub fn market_analysis(sector: Sector) -> MarketAnalysis {
    let market = &profile(sector).market;
    MarketAnalysis {
        companies_count: market.companies_count,
        market_growth_pct: market.growth_pct,
        investment_volume: market.investment_volume.to_string(),
        avg_company_value: market.avg_company_value.to_string(),
        saturation_index: market.saturation,
    }
}

/// Sector trend, with risk and time-to-market shifted one step by impact.
///
/// High impact escalates the disruption risk and tightens the window; low
/// impact relaxes both. `Medio` leaves the table values untouched.
pub fn urgency_analysis(sector: Sector, impact: ImpactLevel) -> UrgencyAnalysis {
    let trend = &profile(sector).trend;
    let (risk, time) = match impact {
        ImpactLevel::Alto | ImpactLevel::MuyAlto => (
            (trend.risk + 1).min(RISK_LADDER.len() - 1),
            trend.time_to_market.saturating_sub(1),
        ),
        ImpactLevel::Bajo => (
            trend.risk.saturating_sub(1),
            (trend.time_to_market + 1).min(TIME_TO_MARKET_LADDER.len() - 1),
        ),
        ImpactLevel::Medio => (trend.risk, trend.time_to_market),
    };
    UrgencyAnalysis {
        trend: trend.trend.to_string(),
        growth_rate: trend.growth_rate.to_string(),
        disruption_risk: RISK_LADDER[risk].to_string(),
        time_to_market: TIME_TO_MARKET_LADDER[time].to_string(),
    }
}

/// The three most innovative companies in the sector's table.
pub fn top_competitors(sector: Sector) -> Vec<Competitor> {
    let mut companies: Vec<&CompanyData> = profile(sector).companies.iter().collect();
    companies.sort_by(|a, b| b.innovation_index.cmp(&a.innovation_index));
    companies
        .into_iter()
        .take(3)
        .map(|c| Competitor {
            name: c.name.to_string(),
            innovation_index: c.innovation_index,
            description: c.description.to_string(),
            founded: c.founded.to_string(),
            hq: c.hq.to_string(),
            market_cap: c.market_cap.to_string(),
            employees: c.employees.to_string(),
            revenue: c.revenue.to_string(),
            key_products: c.key_products.iter().map(|p| p.to_string()).collect(),
        })
        .collect()
}
