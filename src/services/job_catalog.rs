use rust_decimal::Decimal;
use std::sync::OnceLock;

use crate::models::job::{EmploymentType, JobPosting, SalaryBand};

#[derive(Debug)]
pub struct JobCatalog {
    postings: Vec<JobPosting>,
}

static CATALOG: OnceLock<JobCatalog> = OnceLock::new();

pub fn catalog() -> &'static JobCatalog {
    CATALOG.get_or_init(|| JobCatalog::new(seed_postings()))
}

impl JobCatalog {
    pub fn new(postings: Vec<JobPosting>) -> Self {
        Self { postings }
    }

    pub fn all(&self) -> &[JobPosting] {
        &self.postings
    }

    pub fn get(&self, job_id: &str) -> Option<&JobPosting> {
        self.postings.iter().find(|job| job.id == job_id)
    }

    pub fn contains(&self, job_id: &str) -> bool {
        self.get(job_id).is_some()
    }

    pub fn featured(&self) -> impl Iterator<Item = &JobPosting> {
        self.postings.iter().filter(|job| job.featured)
    }

    pub fn regular(&self) -> impl Iterator<Item = &JobPosting> {
        self.postings.iter().filter(|job| !job.featured)
    }
}

fn lpa(whole: i64, tenths: u32) -> Decimal {
    Decimal::new(whole * 10 + i64::from(tenths), 1)
}

fn seed_postings() -> Vec<JobPosting> {
    vec![
        JobPosting {
            id: "graphic-designer",
            title: "Graphic Designer",
            department: "Creative",
            employment_type: EmploymentType::FullTime,
            location: "Kolkata / Remote",
            experience: "1-5 years",
            salary: SalaryBand::new(lpa(3, 0), lpa(8, 0)),
            description: "Create stunning visual designs for our premium pickle brand, from packaging to digital marketing materials.",
            overview: "Join our creative team to design stunning visual experiences for Shahi Pickle, a premium handcrafted pickle brand from Kolkata. You'll be responsible for creating compelling designs across packaging, digital marketing, and brand communications.",
            culture: "At Shahi Pickle, we blend traditional Bengali culinary heritage with modern design sensibilities. Our creative team values innovation, authenticity, and attention to detail. You'll work in a collaborative environment where your creative input is valued and your designs directly impact our brand's growth.",
            highlights: &[
                "Proficiency in Adobe Creative Suite",
                "Strong portfolio showcasing brand design",
                "Understanding of print and digital design",
                "Creative thinking and attention to detail",
            ],
            perks: &[
                "Creative freedom and ownership",
                "Work with premium brand",
                "Flexible working hours",
                "Health insurance",
            ],
            responsibilities: &[
                "Design packaging for premium pickle products",
                "Create digital marketing materials for social media and website",
                "Develop brand guidelines and visual identity elements",
                "Collaborate with marketing team on campaign visuals",
                "Design print materials including brochures, flyers, and advertisements",
                "Maintain brand consistency across all touchpoints",
                "Work on product photography and image editing",
                "Create illustrations and custom graphics as needed",
            ],
            requirements: &[
                "Bachelor's degree in Graphic Design, Visual Arts, or related field",
                "Proficiency in Adobe Creative Suite (Photoshop, Illustrator, InDesign)",
                "Strong portfolio showcasing brand design and packaging work",
                "Understanding of print production and digital design principles",
                "Knowledge of typography, color theory, and composition",
                "Experience with food/FMCG brand design preferred",
                "Creative thinking and attention to detail",
                "Ability to work in a fast-paced environment",
            ],
            benefits: &[
                "Competitive salary with performance bonuses",
                "Creative freedom and ownership of projects",
                "Work with a premium, growing brand",
                "Flexible working hours and remote work options",
                "Health insurance and medical benefits",
                "Professional development opportunities",
                "Team outings and cultural events",
                "Free pickle samples (of course!)",
            ],
            featured: true,
        },
        JobPosting {
            id: "web-developer",
            title: "Web Developer",
            department: "Technology",
            employment_type: EmploymentType::FullTime,
            location: "Kolkata / Remote",
            experience: "2-6 years",
            salary: SalaryBand::new(lpa(5, 0), lpa(12, 0)),
            description: "Build and maintain our e-commerce platform and digital presence using modern web technologies.",
            overview: "Build and maintain our digital presence as we scale our e-commerce operations. You'll work with modern technologies to create seamless user experiences for our customers.",
            culture: "Our tech team is passionate about building scalable solutions that help preserve and promote Bengali culinary traditions. We value clean code, innovative thinking, and continuous learning. You'll have the opportunity to work on challenging problems while making a real impact on our business growth.",
            highlights: &[
                "React, Node.js, TypeScript expertise",
                "Experience with e-commerce platforms",
                "Database design and optimization",
                "API development and integration",
            ],
            perks: &[
                "Latest technology stack",
                "Remote work flexibility",
                "Learning and development budget",
                "Performance bonuses",
            ],
            responsibilities: &[
                "Develop and maintain e-commerce website using React/Next.js",
                "Build responsive web applications with excellent UX",
                "Integrate payment gateways and shipping APIs",
                "Implement SEO best practices and performance optimization",
                "Develop admin dashboards for inventory and order management",
                "Create and maintain RESTful APIs using Node.js",
                "Work with databases (MongoDB/PostgreSQL) for data management",
                "Implement security best practices and data protection",
            ],
            requirements: &[
                "Bachelor's degree in Computer Science or related field",
                "Strong proficiency in React, Node.js, and TypeScript",
                "Experience with e-commerce platforms and payment integration",
                "Knowledge of database design and optimization",
                "Familiarity with cloud platforms (AWS/GCP)",
                "Understanding of web security and performance optimization",
                "Experience with version control (Git) and CI/CD",
                "Problem-solving skills and attention to detail",
            ],
            benefits: &[
                "Competitive salary with equity options",
                "Work with latest technology stack",
                "Remote work flexibility",
                "Learning and development budget (₹50,000/year)",
                "Health insurance and wellness programs",
                "Performance-based bonuses",
                "Conference and training opportunities",
                "Collaborative and innovative work environment",
            ],
            featured: false,
        },
        JobPosting {
            id: "social-media-executive",
            title: "Social Media Executive",
            department: "Marketing",
            employment_type: EmploymentType::FullTime,
            location: "Kolkata",
            experience: "1-3 years",
            salary: SalaryBand::new(lpa(2, 5), lpa(5, 0)),
            description: "Manage our social media presence and create engaging content that tells our brand story.",
            overview: "Lead our social media strategy and create engaging content that tells the story of our authentic Bengali pickles. You'll build our online community and drive brand awareness.",
            culture: "Our marketing team is passionate about storytelling and building authentic connections with our audience. We celebrate creativity, cultural heritage, and community building. You'll work in a dynamic environment where your ideas can directly impact our brand's social presence.",
            highlights: &[
                "Social media platform expertise",
                "Content creation and copywriting",
                "Analytics and reporting skills",
                "Understanding of food industry trends",
            ],
            perks: &[
                "Creative content creation",
                "Brand building experience",
                "Social media tools access",
                "Team outings and events",
            ],
            responsibilities: &[
                "Develop and execute social media strategy across platforms",
                "Create engaging content including posts, stories, and videos",
                "Manage Instagram, Facebook, Twitter, and YouTube channels",
                "Plan and execute social media campaigns and contests",
                "Engage with followers and build online community",
                "Collaborate with influencers and food bloggers",
                "Monitor social media analytics and optimize performance",
                "Coordinate with design team for visual content creation",
            ],
            requirements: &[
                "Bachelor's degree in Marketing, Communications, or related field",
                "Proven experience in social media management",
                "Strong content creation and copywriting skills",
                "Knowledge of social media analytics tools",
                "Understanding of food industry and Bengali culture",
                "Creative thinking and trend awareness",
                "Excellent communication and interpersonal skills",
                "Basic photography and video editing skills",
            ],
            benefits: &[
                "Competitive salary with performance incentives",
                "Creative content creation opportunities",
                "Brand building experience with growing company",
                "Access to latest social media tools and platforms",
                "Health insurance and medical benefits",
                "Team outings and food events",
                "Professional development in digital marketing",
                "Flexible working hours",
            ],
            featured: false,
        },
        JobPosting {
            id: "quality-analyst",
            title: "Quality Analyst",
            department: "Operations",
            employment_type: EmploymentType::FullTime,
            location: "Kolkata",
            experience: "2-5 years",
            salary: SalaryBand::new(lpa(3, 0), lpa(7, 0)),
            description: "Ensure our pickles meet the highest quality standards through rigorous testing and process improvement.",
            overview: "Ensure our pickles meet the highest quality standards through rigorous testing and process improvement. You'll be responsible for maintaining the authentic taste and quality that our customers love.",
            culture: "Our operations team takes pride in maintaining the authentic taste and quality of traditional Bengali pickles. We value precision, continuous improvement, and food safety. You'll work with passionate professionals who care deeply about delivering the best products to our customers.",
            highlights: &[
                "Food technology or related degree",
                "Quality control experience",
                "Knowledge of food safety standards",
                "Analytical and problem-solving skills",
            ],
            perks: &[
                "Work with premium products",
                "Process improvement opportunities",
                "Professional development",
                "Health and safety training",
            ],
            responsibilities: &[
                "Conduct quality control tests on raw materials and finished products",
                "Develop and implement quality assurance procedures",
                "Monitor production processes and identify improvement opportunities",
                "Ensure compliance with food safety standards and regulations",
                "Maintain quality documentation and records",
                "Train production staff on quality procedures",
                "Investigate quality issues and implement corrective actions",
                "Coordinate with suppliers for raw material quality",
            ],
            requirements: &[
                "Bachelor's degree in Food Technology, Chemistry, or related field",
                "Experience in food quality control and assurance",
                "Knowledge of FSSAI, HACCP, and other food safety standards",
                "Strong analytical and problem-solving skills",
                "Attention to detail and accuracy in testing",
                "Understanding of food preservation and processing",
                "Good communication and documentation skills",
                "Ability to work in production environment",
            ],
            benefits: &[
                "Competitive salary with annual increments",
                "Work with premium, authentic food products",
                "Process improvement and innovation opportunities",
                "Professional development in food technology",
                "Health insurance and safety training",
                "Performance-based bonuses",
                "Collaborative work environment",
                "Career growth opportunities",
            ],
            featured: false,
        },
        JobPosting {
            id: "supply-chain-coordinator",
            title: "Supply Chain Coordinator",
            department: "Operations",
            employment_type: EmploymentType::FullTime,
            location: "Kolkata",
            experience: "2-4 years",
            salary: SalaryBand::new(lpa(4, 0), lpa(8, 0)),
            description: "Manage our supply chain operations, from sourcing premium ingredients to ensuring timely delivery of our products.",
            overview: "Manage our supply chain operations from sourcing premium ingredients to ensuring timely delivery of our products. You'll work with suppliers across India to maintain our quality standards while optimizing costs and efficiency.",
            culture: "Our supply chain team is the backbone of our operations, ensuring that we source the finest ingredients while maintaining cost efficiency. We value strategic thinking, relationship building, and operational excellence. You'll work with a dedicated team that takes pride in delivering quality products to our customers across India.",
            highlights: &[
                "Supply chain or logistics background",
                "Experience with inventory management",
                "Knowledge of food industry regulations",
                "Strong analytical and communication skills",
                "Proficiency in ERP systems",
                "Understanding of vendor management",
            ],
            perks: &[
                "Work with premium ingredient suppliers",
                "Process optimization opportunities",
                "Travel opportunities across India",
                "Performance-based incentives",
                "Professional development in logistics",
                "Health insurance and benefits",
            ],
            responsibilities: &[
                "Source and procure premium ingredients from trusted suppliers",
                "Manage inventory levels and optimize stock turnover",
                "Coordinate with logistics partners for timely deliveries",
                "Monitor supplier performance and maintain quality standards",
                "Negotiate contracts and pricing with vendors",
                "Implement supply chain optimization strategies",
                "Track and analyze supply chain metrics and KPIs",
                "Ensure compliance with food safety and regulatory requirements",
                "Manage relationships with packaging and raw material suppliers",
                "Coordinate with production team for demand planning",
            ],
            requirements: &[
                "Bachelor's degree in Supply Chain Management, Logistics, or related field",
                "Experience in supply chain operations, preferably in food industry",
                "Knowledge of inventory management and demand planning",
                "Understanding of food safety regulations and compliance",
                "Proficiency in ERP systems and supply chain software",
                "Strong analytical and problem-solving skills",
                "Excellent communication and negotiation abilities",
                "Experience with vendor management and procurement",
                "Knowledge of logistics and transportation management",
                "Ability to work in fast-paced environment",
            ],
            benefits: &[
                "Competitive salary with performance-based incentives",
                "Travel opportunities across India for supplier visits",
                "Work with premium ingredient suppliers and vendors",
                "Process optimization and efficiency improvement projects",
                "Professional development in supply chain management",
                "Health insurance and comprehensive benefits package",
                "Flexible working arrangements",
                "Career advancement opportunities in operations",
                "Exposure to end-to-end supply chain operations",
                "Team building events and company outings",
            ],
            featured: true,
        },
    ]
}
